//! External service clients.
//!
//! The catalog is consumed through the [`MetadataProvider`] capability so
//! the planning core never touches a concrete transport.

pub mod tmdb;

use crate::models::catalog::{CatalogEntry, EpisodeRecord, SeasonDescriptor};
use crate::Result;

/// Capability the planner needs from a series catalog.
///
/// Implementations are injected into the planner at construction; there is
/// no ambient client. A transport failure from any method aborts the
/// operation in progress, since no partial catalog state can be trusted.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search catalog entries by a (possibly empty) title query.
    async fn search_by_title(&self, query: &str) -> Result<Vec<CatalogEntry>>;

    /// List a series' seasons in ascending season-number order.
    async fn list_seasons(&self, entry_id: u64) -> Result<Vec<SeasonDescriptor>>;

    /// Fetch one episode, or `None` when the season has no such episode.
    async fn get_episode(
        &self,
        entry_id: u64,
        season_number: u16,
        episode_number: u32,
    ) -> Result<Option<EpisodeRecord>>;
}
