//! Catalog data models.

use serde::{Deserialize, Serialize};

/// A series entry returned by a title search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Catalog id of the series.
    pub id: u64,
    /// Name shown to the user during selection.
    pub display_name: String,
}

/// One season of a series, as listed by the catalog.
///
/// Season 0 ("specials") may appear in raw provider output; the planner
/// never lets it participate in resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonDescriptor {
    pub season_number: u16,
    pub name: String,
}

/// Episode details fetched from the catalog.
///
/// Getting a record back at all confirms the episode exists in the probed
/// season; `name` is the episode title when the catalog has one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub id: u64,
    pub name: Option<String>,
}

/// A confirmed (season, episode) pair for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeMatch {
    pub season_number: u16,
    pub episode_number: u32,
    /// Title embedded into the proposed filename when present.
    pub episode_title: Option<String>,
}
