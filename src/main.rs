//! Anime Organizer CLI
//!
//! A command-line tool for matching loosely named episode files against
//! TMDB and moving them into Season folders with canonical names.

use anime_organizer::cli::{
    args::{Cli, Commands},
    commands::organize,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run the appropriate command
    match cli.command {
        Commands::Organize {
            folder,
            policy,
            entry,
            yes,
        } => {
            organize::organize(&folder, policy.into(), entry, yes).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("anime_organizer=debug")
    } else {
        EnvFilter::new("anime_organizer=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
