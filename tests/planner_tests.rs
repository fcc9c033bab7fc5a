//! Integration tests for plan generation.
//!
//! Tests cover:
//! - End-to-end planning against a scripted in-memory provider
//! - Ambiguity surfacing and resolution by chosen entry id
//! - Skip reporting for unextractable and unresolvable files
//! - Subtitle extension remapping
//! - Season folder pre-creation and specials exclusion

use anime_organizer::core::planner::Planner;
use anime_organizer::models::catalog::{CatalogEntry, EpisodeRecord, SeasonDescriptor};
use anime_organizer::models::plan::{PlanOutcome, RenameKind, SkipReason};
use anime_organizer::services::MetadataProvider;
use anime_organizer::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Scripted provider: fixed candidates, season lists, and episode table.
#[derive(Default)]
struct FakeProvider {
    candidates: Vec<CatalogEntry>,
    seasons: HashMap<u64, Vec<SeasonDescriptor>>,
    episodes: HashMap<(u64, u16, u32), EpisodeRecord>,
}

impl FakeProvider {
    fn with_candidates(mut self, candidates: Vec<(u64, &str)>) -> Self {
        self.candidates = candidates
            .into_iter()
            .map(|(id, name)| CatalogEntry {
                id,
                display_name: name.to_string(),
            })
            .collect();
        self
    }

    fn with_seasons(mut self, entry_id: u64, numbers: &[u16]) -> Self {
        self.seasons.insert(
            entry_id,
            numbers
                .iter()
                .map(|&n| SeasonDescriptor {
                    season_number: n,
                    name: format!("Season {}", n),
                })
                .collect(),
        );
        self
    }

    fn with_episode(mut self, entry_id: u64, season: u16, episode: u32, name: Option<&str>) -> Self {
        self.episodes.insert(
            (entry_id, season, episode),
            EpisodeRecord {
                id: 1000 + episode as u64,
                name: name.map(|n| n.to_string()),
            },
        );
        self
    }
}

#[async_trait::async_trait]
impl MetadataProvider for FakeProvider {
    async fn search_by_title(&self, _query: &str) -> Result<Vec<CatalogEntry>> {
        Ok(self.candidates.clone())
    }

    async fn list_seasons(&self, entry_id: u64) -> Result<Vec<SeasonDescriptor>> {
        Ok(self.seasons.get(&entry_id).cloned().unwrap_or_default())
    }

    async fn get_episode(
        &self,
        entry_id: u64,
        season_number: u16,
        episode_number: u32,
    ) -> Result<Option<EpisodeRecord>> {
        Ok(self
            .episodes
            .get(&(entry_id, season_number, episode_number))
            .cloned())
    }
}

/// Create the release folder inside a temp dir, with the given files.
fn release_folder(temp: &TempDir, name: &str, files: &[&str]) -> PathBuf {
    let root = temp.path().join(name);
    fs::create_dir(&root).unwrap();
    for file in files {
        fs::write(root.join(file), "content").unwrap();
    }
    root
}

fn planner(provider: FakeProvider) -> Planner {
    Planner::new(Arc::new(provider))
}

fn season_dir(root: &Path, season: u16) -> PathBuf {
    root.join(format!("Season {}", season))
}

#[tokio::test]
async fn test_end_to_end_single_candidate() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(&temp, "MyShow [BDRip] - extra", &["MyShow EP05.mkv"]);

    let provider = FakeProvider::default()
        .with_candidates(vec![(42, "MyShow")])
        .with_seasons(42, &[1, 2])
        .with_episode(42, 1, 5, Some("The Beginning"));

    let outcome = planner(provider).plan(&root).await.unwrap();
    let plan = match outcome {
        PlanOutcome::Ready(plan) => plan,
        PlanOutcome::NeedsSelection(_) => panic!("expected a ready plan"),
    };

    assert_eq!(plan.entry_id, 42);
    assert_eq!(plan.media.len(), 1);
    assert!(plan.subtitles.is_empty());
    assert!(plan.skipped.is_empty());

    let rename = &plan.media[0];
    assert_eq!(rename.kind, RenameKind::Media);
    assert_eq!(rename.season_number, 1);
    assert_eq!(rename.episode_number, 5);
    assert_eq!(rename.proposed_filename, "S01E05 - The Beginning.mkv");
    assert_eq!(rename.target_folder, season_dir(&root, 1));
    assert_eq!(
        rename.target_path,
        season_dir(&root, 1).join("S01E05 - The Beginning.mkv")
    );

    // Destination tree is pre-built for every season, files or not.
    assert!(season_dir(&root, 1).is_dir());
    assert!(season_dir(&root, 2).is_dir());
}

#[tokio::test]
async fn test_title_omitted_when_catalog_has_none() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(&temp, "MyShow", &["MyShow EP05.mkv"]);

    let provider = FakeProvider::default()
        .with_candidates(vec![(42, "MyShow")])
        .with_seasons(42, &[1])
        .with_episode(42, 1, 5, None);

    let outcome = planner(provider).plan(&root).await.unwrap();
    let PlanOutcome::Ready(plan) = outcome else {
        panic!("expected a ready plan");
    };

    assert_eq!(plan.media[0].proposed_filename, "S01E05.mkv");
}

#[tokio::test]
async fn test_empty_episode_title_is_omitted() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(&temp, "MyShow", &["MyShow EP05.mkv"]);

    let provider = FakeProvider::default()
        .with_candidates(vec![(42, "MyShow")])
        .with_seasons(42, &[1])
        .with_episode(42, 1, 5, Some(""));

    let PlanOutcome::Ready(plan) = planner(provider).plan(&root).await.unwrap() else {
        panic!("expected a ready plan");
    };

    assert_eq!(plan.media[0].proposed_filename, "S01E05.mkv");
}

#[tokio::test]
async fn test_ambiguity_surfaces_before_any_processing() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(&temp, "Show A", &["Show A EP01.mkv"]);

    let provider = FakeProvider::default()
        .with_candidates(vec![(1, "Show A"), (2, "Show A Remake")])
        .with_seasons(1, &[1])
        .with_seasons(2, &[1, 2])
        .with_episode(1, 1, 1, Some("First"))
        .with_episode(2, 2, 1, Some("Remake First"));

    let planner = planner(provider);
    let outcome = planner.plan(&root).await.unwrap();

    let PlanOutcome::NeedsSelection(candidates) = outcome else {
        panic!("expected candidates");
    };
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].display_name, "Show A");
    assert_eq!(candidates[1].display_name, "Show A Remake");

    // Nothing was planned or created before the selection.
    assert!(!season_dir(&root, 1).exists());

    // Supplying the chosen id drives all subsequent resolution.
    let plan = planner.plan_with_entry(&root, 2).await.unwrap();
    assert_eq!(plan.entry_id, 2);
    assert_eq!(plan.media.len(), 1);
    assert_eq!(plan.media[0].season_number, 2);
    assert!(season_dir(&root, 2).is_dir());
}

#[tokio::test]
async fn test_zero_candidates_is_no_title_match() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(&temp, "Unknown [x] - y", &["ep1.mkv"]);

    let provider = FakeProvider::default();
    let err = planner(provider).plan(&root).await.unwrap_err();

    match err {
        Error::NoTitleMatch(query) => assert_eq!(query, "Unknown"),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_no_usable_seasons() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(&temp, "MyShow", &["MyShow EP01.mkv"]);

    // Only a specials season, which never participates.
    let provider = FakeProvider::default()
        .with_candidates(vec![(42, "MyShow")])
        .with_seasons(42, &[0]);

    let err = planner(provider).plan(&root).await.unwrap_err();
    assert!(matches!(err, Error::NoSeasonData(42)));
}

#[tokio::test]
async fn test_specials_season_is_never_probed() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(&temp, "MyShow", &["MyShow EP05.mkv"]);

    // Episode 5 exists only in season 0; resolution must not find it.
    let provider = FakeProvider::default()
        .with_candidates(vec![(42, "MyShow")])
        .with_seasons(42, &[0, 1])
        .with_episode(42, 0, 5, Some("Special"));

    let PlanOutcome::Ready(plan) = planner(provider).plan(&root).await.unwrap() else {
        panic!("expected a ready plan");
    };

    assert!(plan.media.is_empty());
    assert_eq!(plan.skipped.len(), 1);
    assert_eq!(plan.skipped[0].reason, SkipReason::EpisodeNotResolved);
    assert!(!season_dir(&root, 0).exists());
    assert!(season_dir(&root, 1).is_dir());
}

#[tokio::test]
async fn test_skips_are_reported_with_reasons() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(
        &temp,
        "MyShow",
        &["randomname.mkv", "MyShow EP99.mkv", "MyShow EP05.mkv"],
    );

    let provider = FakeProvider::default()
        .with_candidates(vec![(42, "MyShow")])
        .with_seasons(42, &[1])
        .with_episode(42, 1, 5, None);

    let PlanOutcome::Ready(plan) = planner(provider).plan(&root).await.unwrap() else {
        panic!("expected a ready plan");
    };

    assert_eq!(plan.media.len(), 1);
    assert_eq!(plan.media[0].original_filename, "MyShow EP05.mkv");

    let reasons: HashMap<&str, SkipReason> = plan
        .skipped
        .iter()
        .map(|s| (s.filename.as_str(), s.reason))
        .collect();
    assert_eq!(
        reasons.get("randomname.mkv"),
        Some(&SkipReason::EpisodeNumberNotFound)
    );
    assert_eq!(
        reasons.get("MyShow EP99.mkv"),
        Some(&SkipReason::EpisodeNotResolved)
    );
}

#[tokio::test]
async fn test_subtitle_remapping() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(
        &temp,
        "MyShow",
        &["MyShow EP05.txt", "MyShow EP06.srt", "MyShow EP05.mkv"],
    );

    let provider = FakeProvider::default()
        .with_candidates(vec![(42, "MyShow")])
        .with_seasons(42, &[1])
        .with_episode(42, 1, 5, Some("Five"))
        .with_episode(42, 1, 6, Some("Six"));

    let PlanOutcome::Ready(plan) = planner(provider).plan(&root).await.unwrap() else {
        panic!("expected a ready plan");
    };

    // Subtitle files belong to the subtitle pass only.
    assert_eq!(plan.media.len(), 1);
    assert_eq!(plan.media[0].original_filename, "MyShow EP05.mkv");

    assert_eq!(plan.subtitles.len(), 2);
    let by_name: HashMap<&str, &str> = plan
        .subtitles
        .iter()
        .map(|s| (s.original_filename.as_str(), s.proposed_filename.as_str()))
        .collect();
    assert_eq!(by_name["MyShow EP05.txt"], "S01E05 - Five.ass");
    assert_eq!(by_name["MyShow EP06.srt"], "S01E06 - Six.srt");
    assert!(plan
        .subtitles
        .iter()
        .all(|s| s.kind == RenameKind::Subtitle));
}

#[tokio::test]
async fn test_resolution_is_deterministic_first_season_wins() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(&temp, "MyShow", &["MyShow EP03.mkv"]);

    // Episode 3 exists in both seasons; the probe order decides.
    let provider = FakeProvider::default()
        .with_candidates(vec![(42, "MyShow")])
        .with_seasons(42, &[1, 2])
        .with_episode(42, 1, 3, Some("One"))
        .with_episode(42, 2, 3, Some("Two"));

    let planner = planner(provider);
    for _ in 0..3 {
        let plan = planner.plan_with_entry(&root, 42).await.unwrap();
        assert_eq!(plan.media[0].season_number, 1);
        assert_eq!(plan.media[0].proposed_filename, "S01E03 - One.mkv");
    }
}

#[tokio::test]
async fn test_episode_title_is_sanitized_for_filenames() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(&temp, "MyShow", &["MyShow EP05.mkv"]);

    let provider = FakeProvider::default()
        .with_candidates(vec![(42, "MyShow")])
        .with_seasons(42, &[1])
        .with_episode(42, 1, 5, Some("Who? Me: Maybe"));

    let PlanOutcome::Ready(plan) = planner(provider).plan(&root).await.unwrap() else {
        panic!("expected a ready plan");
    };

    assert_eq!(
        plan.media[0].proposed_filename,
        "S01E05 - Who_ Me_ Maybe.mkv"
    );
}

#[tokio::test]
async fn test_large_episode_numbers_render_natural_width() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(&temp, "MyShow", &["MyShow EP105.mkv"]);

    let provider = FakeProvider::default()
        .with_candidates(vec![(42, "MyShow")])
        .with_seasons(42, &[1])
        .with_episode(42, 1, 105, None);

    let PlanOutcome::Ready(plan) = planner(provider).plan(&root).await.unwrap() else {
        panic!("expected a ready plan");
    };

    assert_eq!(plan.media[0].proposed_filename, "S01E105.mkv");
}

#[tokio::test]
async fn test_subdirectories_are_ignored() {
    let temp = TempDir::new().unwrap();
    let root = release_folder(&temp, "MyShow", &["MyShow EP05.mkv"]);
    fs::create_dir(root.join("extras")).unwrap();
    fs::write(root.join("extras").join("MyShow EP06.mkv"), "content").unwrap();

    let provider = FakeProvider::default()
        .with_candidates(vec![(42, "MyShow")])
        .with_seasons(42, &[1])
        .with_episode(42, 1, 5, None)
        .with_episode(42, 1, 6, None);

    let PlanOutcome::Ready(plan) = planner(provider).plan(&root).await.unwrap() else {
        panic!("expected a ready plan");
    };

    assert_eq!(plan.media.len(), 1);
    assert_eq!(plan.media[0].original_filename, "MyShow EP05.mkv");
}
