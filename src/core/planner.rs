//! Rename plan generation.
//!
//! Coordinates the planning flow:
//! 1. Derive a search title from the folder name
//! 2. Resolve it to a catalog entry, or surface the candidates
//! 3. List the entry's seasons and pre-create the `Season N` folders
//! 4. Extract and resolve an episode number for every file
//! 5. Produce the media and subtitle rename lists

use crate::core::scanner::{self, FolderEntry};
use crate::core::{extractor, resolver, title};
use crate::models::plan::{
    PlanOutcome, PlannedRename, RenameKind, RenamePlan, SkipReason, SkippedFile,
};
use crate::services::MetadataProvider;
use crate::utils::fs as fs_utils;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;

/// Extensions handled by the subtitle pass. Everything else goes through
/// the media pass.
const SUBTITLE_EXTENSIONS: &[&str] = &["txt", "srt"];

/// Rename plan generator.
///
/// The catalog is an injected capability; the planner issues one blocking
/// query at a time and never caches responses across runs.
pub struct Planner {
    provider: Arc<dyn MetadataProvider>,
}

impl Planner {
    /// Create a planner over the given catalog provider.
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// Plan the folder, resolving the series from its cleaned-up name.
    ///
    /// Returns [`PlanOutcome::NeedsSelection`] when several entries match
    /// the derived title; call [`Planner::plan_with_entry`] with the chosen
    /// id to continue. A search with zero matches fails with
    /// [`crate::Error::NoTitleMatch`].
    pub async fn plan(&self, root: &Path) -> Result<PlanOutcome> {
        let folder_name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let query = title::derive_search_title(&folder_name);

        tracing::info!("Searching catalog for {:?} (folder {:?})", query, folder_name);
        let mut candidates = self.provider.search_by_title(&query).await?;

        match candidates.len() {
            0 => Err(crate::Error::NoTitleMatch(query)),
            1 => {
                let entry = candidates.remove(0);
                let plan = self.plan_with_entry(root, entry.id).await?;
                Ok(PlanOutcome::Ready(plan))
            }
            _ => Ok(PlanOutcome::NeedsSelection(candidates)),
        }
    }

    /// Plan the folder against an already-chosen catalog entry.
    pub async fn plan_with_entry(&self, root: &Path, entry_id: u64) -> Result<RenamePlan> {
        let entries = scanner::list_files(root)?;

        let mut seasons = self.provider.list_seasons(entry_id).await?;
        // Specials never participate, whatever the provider returned.
        seasons.retain(|s| s.season_number != 0);
        if seasons.is_empty() {
            return Err(crate::Error::NoSeasonData(entry_id));
        }

        // Pre-build the destination tree so every season folder exists,
        // files or not.
        for season in &seasons {
            let season_folder = root.join(format!("Season {}", season.season_number));
            fs_utils::create_dir_all(&season_folder)?;
        }

        let mut plan = RenamePlan {
            root: root.to_path_buf(),
            entry_id,
            ..Default::default()
        };

        let pb = ProgressBar::new(entries.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        // Media pass: every file that is not a subtitle.
        for entry in &entries {
            if is_subtitle(entry) {
                continue;
            }
            pb.set_message(entry.filename.clone());
            self.plan_file(&mut plan, entry, RenameKind::Media, &seasons)
                .await?;
            pb.inc(1);
        }

        // Subtitle pass.
        for entry in &entries {
            if !is_subtitle(entry) {
                continue;
            }
            pb.set_message(entry.filename.clone());
            self.plan_file(&mut plan, entry, RenameKind::Subtitle, &seasons)
                .await?;
            pb.inc(1);
        }

        pb.finish_and_clear();

        tracing::info!(
            "Planned {} media and {} subtitle renames, {} skipped",
            plan.media.len(),
            plan.subtitles.len(),
            plan.skipped.len()
        );

        Ok(plan)
    }

    /// Plan a single file, recording a skip when extraction or resolution
    /// fails. Provider transport errors propagate and abort the plan.
    async fn plan_file(
        &self,
        plan: &mut RenamePlan,
        entry: &FolderEntry,
        kind: RenameKind,
        seasons: &[crate::models::catalog::SeasonDescriptor],
    ) -> Result<()> {
        let Some(episode_number) = extractor::extract_episode_number(&entry.filename) else {
            tracing::debug!("No episode number in {:?}", entry.filename);
            plan.skipped.push(SkippedFile {
                filename: entry.filename.clone(),
                reason: SkipReason::EpisodeNumberNotFound,
            });
            return Ok(());
        };

        let matched = resolver::resolve_season(
            self.provider.as_ref(),
            plan.entry_id,
            seasons,
            episode_number,
        )
        .await?;

        let Some(matched) = matched else {
            tracing::debug!(
                "Episode {} of {:?} not found in any season",
                episode_number,
                entry.filename
            );
            plan.skipped.push(SkippedFile {
                filename: entry.filename.clone(),
                reason: SkipReason::EpisodeNotResolved,
            });
            return Ok(());
        };

        let suffix = match kind {
            RenameKind::Media => fs_utils::suffix(&entry.path),
            RenameKind::Subtitle => remap_subtitle_suffix(entry.extension.as_deref()),
        };

        let proposed_filename = match &matched.episode_title {
            Some(episode_title) => format!(
                "S{:02}E{:02} - {}{}",
                matched.season_number,
                matched.episode_number,
                sanitize_filename(episode_title),
                suffix
            ),
            None => format!(
                "S{:02}E{:02}{}",
                matched.season_number, matched.episode_number, suffix
            ),
        };

        let target_folder = plan.root.join(format!("Season {}", matched.season_number));
        let rename = PlannedRename {
            kind,
            source_path: entry.path.clone(),
            target_path: target_folder.join(&proposed_filename),
            target_folder,
            season_number: matched.season_number,
            episode_number: matched.episode_number,
            original_filename: entry.filename.clone(),
            proposed_filename,
        };

        match kind {
            RenameKind::Media => plan.media.push(rename),
            RenameKind::Subtitle => plan.subtitles.push(rename),
        }

        Ok(())
    }
}

/// Whether the subtitle pass owns this file. The media pass skips these,
/// so a file is planned at most once.
fn is_subtitle(entry: &FolderEntry) -> bool {
    entry
        .extension
        .as_deref()
        .map(|ext| SUBTITLE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// `.txt` subtitle sources are renamed to `.ass`; other subtitle
/// extensions keep their lowercased name.
fn remap_subtitle_suffix(extension: Option<&str>) -> String {
    match extension {
        Some("txt") => ".ass".to_string(),
        Some(ext) => format!(".{}", ext),
        None => String::new(),
    }
}

/// Sanitize an episode title for use in filenames.
fn sanitize_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
