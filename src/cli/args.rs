//! Command line argument definitions.

use crate::models::plan::ExecutePolicy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Anime Organizer - match episode files to TMDB and sort them into season folders
#[derive(Parser, Debug)]
#[command(name = "anime-organizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Organize a release folder into Season N subfolders
    Organize {
        /// Folder containing the episode files
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,

        /// How to execute the confirmed plan
        #[arg(long, value_enum, default_value_t = PolicyArg::AllAtOnce)]
        policy: PolicyArg,

        /// Catalog entry id to use, skipping the search/selection step
        #[arg(long, value_name = "ENTRY_ID")]
        entry: Option<u64>,

        /// Execute without the editable confirmation step
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// CLI-facing execution policy.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PolicyArg {
    /// Execute every entry without per-item prompts
    AllAtOnce,
    /// Offer each entry for accept/skip before moving it
    OneByOne,
}

impl From<PolicyArg> for ExecutePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::AllAtOnce => ExecutePolicy::AllAtOnce,
            PolicyArg::OneByOne => ExecutePolicy::OneByOne,
        }
    }
}
