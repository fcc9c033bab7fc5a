//! Organize command implementation.
//!
//! Binds the planner's suspend points to the terminal: candidate
//! selection, the editable confirmation step, per-item accept/skip under
//! one-by-one execution, and the final outcome report.

use crate::core::executor;
use crate::core::planner::Planner;
use crate::models::catalog::CatalogEntry;
use crate::models::config;
use crate::models::plan::{ExecutePolicy, MoveStatus, PlanOutcome, PlannedRename, RenamePlan};
use crate::services::tmdb::TmdbClient;
use crate::services::MetadataProvider;
use crate::utils::fs as fs_utils;
use crate::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::path::Path;
use std::sync::Arc;

/// Organize a release folder.
pub async fn organize(
    folder: &Path,
    policy: ExecutePolicy,
    entry: Option<u64>,
    yes: bool,
) -> Result<()> {
    fs_utils::ensure_directory(folder)?;

    let settings = config::load_config();
    let client = TmdbClient::from_settings(&settings.tmdb)?;
    if !client.verify_api_key().await? {
        return Err(crate::Error::TmdbApiKeyInvalid);
    }

    let provider: Arc<dyn MetadataProvider> = Arc::new(client);
    let planner = Planner::new(provider);

    println!("{}", "[PLAN] Matching files against the catalog...".bold().cyan());
    let plan = match entry {
        Some(entry_id) => planner.plan_with_entry(folder, entry_id).await?,
        None => match planner.plan(folder).await? {
            PlanOutcome::Ready(plan) => plan,
            PlanOutcome::NeedsSelection(candidates) => {
                let chosen = select_entry(&candidates)?;
                planner.plan_with_entry(folder, chosen).await?
            }
        },
    };

    report_skips(&plan);

    if plan.is_empty() {
        println!("{}", "Nothing to organize.".yellow());
        return Ok(());
    }

    let mut entries = plan.into_entries();
    print_plan(&entries);

    if !yes {
        edit_entries(&mut entries)?;

        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Execute {} moves?", entries.len()))
            .default(true)
            .interact()
            .map_err(|e| crate::Error::other(e.to_string()))?;
        if !proceed {
            println!("{}", "Cancelled.".yellow());
            return Ok(());
        }
    }

    let outcomes = executor::execute_plan(&entries, policy, |item| {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Rename {} -> {}?",
                item.original_filename, item.proposed_filename
            ))
            .default(true)
            .interact()
            .unwrap_or(false)
    });

    println!();
    println!("{}", "[Summary]".bold().green());
    for outcome in &outcomes {
        match &outcome.status {
            MoveStatus::Moved => println!(
                "  {} {} -> {}",
                "moved".green(),
                outcome.original_filename,
                outcome.proposed_filename
            ),
            MoveStatus::Skipped => {
                println!("  {} {}", "skipped".yellow(), outcome.original_filename)
            }
            MoveStatus::Failed(reason) => println!(
                "  {} {}: {}",
                "failed".red(),
                outcome.original_filename,
                reason
            ),
        }
    }

    Ok(())
}

/// Ask the user to pick one of several matching series.
fn select_entry(candidates: &[CatalogEntry]) -> Result<u64> {
    let names: Vec<&str> = candidates
        .iter()
        .map(|c| c.display_name.as_str())
        .collect();

    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Multiple series matched; pick one")
        .items(&names)
        .default(0)
        .interact()
        // Non-interactive runs cannot resolve the ambiguity.
        .map_err(|_| crate::Error::AmbiguousTitleMatch(candidates.len()))?;

    Ok(candidates[index].id)
}

/// Every skipped file is reported with its reason, never silently dropped.
fn report_skips(plan: &RenamePlan) {
    for skip in &plan.skipped {
        println!("  {} {} ({})", "skip".yellow(), skip.filename, skip.reason);
    }
}

fn print_plan(entries: &[PlannedRename]) {
    println!();
    println!("{}", "[Proposed renames]".bold());
    for item in entries {
        println!(
            "  {:8} {} -> Season {}/{}",
            item.kind.to_string(),
            item.original_filename,
            item.season_number,
            item.proposed_filename
        );
    }
    println!();
}

/// Offer to adjust proposed filenames before execution.
fn edit_entries(entries: &mut [PlannedRename]) -> Result<()> {
    let edit = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Edit proposed filenames?")
        .default(false)
        .interact()
        .map_err(|e| crate::Error::other(e.to_string()))?;
    if !edit {
        return Ok(());
    }

    for item in entries.iter_mut() {
        let name: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(item.original_filename.clone())
            .with_initial_text(item.proposed_filename.clone())
            .interact_text()
            .map_err(|e| crate::Error::other(e.to_string()))?;
        if name != item.proposed_filename {
            item.set_proposed_filename(name);
        }
    }

    Ok(())
}
