//! Plan execution.
//!
//! Moves confirmed entries into their season folders. Failures are
//! per-item: one bad move never stops the rest, and nothing is rolled
//! back afterwards.

use crate::models::plan::{ExecutePolicy, MoveOutcome, MoveStatus, PlannedRename};
use crate::utils::fs as fs_utils;
use crate::Result;

/// Execute the given entries under `policy`.
///
/// `confirm` is consulted once per entry under [`ExecutePolicy::OneByOne`];
/// returning `false` records an explicit skip and leaves the file where it
/// is. Under [`ExecutePolicy::AllAtOnce`] every entry executes without
/// prompting. Each entry uses its current (possibly edited) target path.
pub fn execute_plan<F>(
    entries: &[PlannedRename],
    policy: ExecutePolicy,
    mut confirm: F,
) -> Vec<MoveOutcome>
where
    F: FnMut(&PlannedRename) -> bool,
{
    let mut outcomes = Vec::with_capacity(entries.len());

    for entry in entries {
        if policy == ExecutePolicy::OneByOne && !confirm(entry) {
            tracing::info!("Skipped: {}", entry.original_filename);
            outcomes.push(outcome_for(entry, MoveStatus::Skipped));
            continue;
        }

        let status = match move_entry(entry) {
            Ok(()) => {
                tracing::info!(
                    "Moved: {} -> {}",
                    entry.original_filename,
                    entry.proposed_filename
                );
                MoveStatus::Moved
            }
            Err(e) => {
                tracing::error!("Move failed for {}: {}", entry.original_filename, e);
                MoveStatus::Failed(e.to_string())
            }
        };
        outcomes.push(outcome_for(entry, status));
    }

    outcomes
}

fn outcome_for(entry: &PlannedRename, status: MoveStatus) -> MoveOutcome {
    MoveOutcome {
        kind: entry.kind,
        original_filename: entry.original_filename.clone(),
        proposed_filename: entry.proposed_filename.clone(),
        status,
    }
}

/// Move one entry to its target path.
///
/// An existing file at the target is an error rather than an overwrite;
/// a colliding plan surfaces here as a per-item failure.
fn move_entry(entry: &PlannedRename) -> Result<()> {
    if entry.target_path.exists() {
        return Err(crate::Error::FileAlreadyExists(
            entry.target_path.display().to_string(),
        ));
    }

    if let Some(parent) = entry.target_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    fs_utils::move_file(&entry.source_path, &entry.target_path)
}
