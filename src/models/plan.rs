//! Rename plan data model.

use super::catalog::CatalogEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What kind of file a planned rename covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenameKind {
    Media,
    Subtitle,
}

impl fmt::Display for RenameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenameKind::Media => write!(f, "media"),
            RenameKind::Subtitle => write!(f, "subtitle"),
        }
    }
}

/// A not-yet-executed file move computed by the planner.
///
/// Only the proposed filename (and with it the target path) may change
/// before execution; everything else is fixed at planning time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedRename {
    pub kind: RenameKind,
    pub source_path: PathBuf,
    pub target_path: PathBuf,
    /// Always `<root>/Season {season_number}`.
    pub target_folder: PathBuf,
    pub season_number: u16,
    pub episode_number: u32,
    pub original_filename: String,
    pub proposed_filename: String,
}

impl PlannedRename {
    /// Replace the proposed filename, keeping the target path in sync.
    pub fn set_proposed_filename<S: Into<String>>(&mut self, filename: S) {
        self.proposed_filename = filename.into();
        self.target_path = self.target_folder.join(&self.proposed_filename);
    }
}

/// Why a file was left out of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No extraction rule produced an episode number.
    EpisodeNumberNotFound,
    /// No season confirmed the extracted episode number.
    EpisodeNotResolved,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EpisodeNumberNotFound => write!(f, "no episode number in filename"),
            SkipReason::EpisodeNotResolved => write!(f, "no season contains this episode"),
        }
    }
}

/// A file the planner visited but excluded from the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: SkipReason,
}

/// The full rename plan for one folder.
///
/// Media and subtitle renames are independent lists built by separate
/// passes over the same directory listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenamePlan {
    /// The folder being organized.
    pub root: PathBuf,
    /// Catalog entry the plan was built against.
    pub entry_id: u64,
    pub media: Vec<PlannedRename>,
    pub subtitles: Vec<PlannedRename>,
    /// Files visited but not planned, each with its reason.
    pub skipped: Vec<SkippedFile>,
}

impl RenamePlan {
    /// Whether the plan contains nothing to execute.
    pub fn is_empty(&self) -> bool {
        self.media.is_empty() && self.subtitles.is_empty()
    }

    /// Flatten into a single editable list, media first.
    pub fn into_entries(self) -> Vec<PlannedRename> {
        let mut entries = self.media;
        entries.extend(self.subtitles);
        entries
    }
}

/// How the planner answered.
#[derive(Debug)]
pub enum PlanOutcome {
    /// The title search was unambiguous and the plan is complete.
    Ready(RenamePlan),
    /// Several entries matched; the caller must pick one and call
    /// `plan_with_entry` to continue.
    NeedsSelection(Vec<CatalogEntry>),
}

/// Execution policy for a confirmed plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutePolicy {
    /// Execute every entry without per-item prompts.
    #[default]
    AllAtOnce,
    /// Offer each entry for accept/skip before moving it.
    OneByOne,
}

/// Terminal state of one executed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveStatus {
    Moved,
    /// Declined by the caller under `OneByOne`; the file was not touched.
    Skipped,
    Failed(String),
}

/// Per-entry execution report.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub kind: RenameKind,
    pub original_filename: String,
    pub proposed_filename: String,
    pub status: MoveStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_rename() -> PlannedRename {
        PlannedRename {
            kind: RenameKind::Media,
            source_path: PathBuf::from("/show/ep5.mkv"),
            target_path: PathBuf::from("/show/Season 1/S01E05.mkv"),
            target_folder: PathBuf::from("/show/Season 1"),
            season_number: 1,
            episode_number: 5,
            original_filename: "ep5.mkv".to_string(),
            proposed_filename: "S01E05.mkv".to_string(),
        }
    }

    #[test]
    fn test_set_proposed_filename_updates_target_path() {
        let mut rename = sample_rename();
        rename.set_proposed_filename("S01E05 - Pilot.mkv");

        assert_eq!(rename.proposed_filename, "S01E05 - Pilot.mkv");
        assert_eq!(
            rename.target_path,
            PathBuf::from("/show/Season 1/S01E05 - Pilot.mkv")
        );
        assert_eq!(rename.target_folder, PathBuf::from("/show/Season 1"));
    }

    #[test]
    fn test_into_entries_media_first() {
        let mut subtitle = sample_rename();
        subtitle.kind = RenameKind::Subtitle;

        let plan = RenamePlan {
            media: vec![sample_rename()],
            subtitles: vec![subtitle],
            ..Default::default()
        };

        let entries = plan.into_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, RenameKind::Media);
        assert_eq!(entries[1].kind, RenameKind::Subtitle);
    }

    #[test]
    fn test_plan_is_empty() {
        let plan = RenamePlan::default();
        assert!(plan.is_empty());

        let plan = RenamePlan {
            subtitles: vec![sample_rename()],
            ..Default::default()
        };
        assert!(!plan.is_empty());
    }
}
