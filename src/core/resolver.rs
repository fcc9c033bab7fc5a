//! Season resolution.
//!
//! An extracted episode number says nothing about which season it belongs
//! to, so the resolver probes each season in catalog order until the
//! catalog confirms the episode exists there.

use crate::models::catalog::{EpisodeMatch, SeasonDescriptor};
use crate::services::MetadataProvider;
use crate::Result;

/// Find the first season, in the given order, that contains `episode_number`.
///
/// Issues one provider query per season until a hit; returns `None` when no
/// season confirms the number. Season lists are short, so the linear probe
/// stays cheap even though it runs once per file. Probing order is the
/// season list order, which makes resolution deterministic for a fixed
/// provider.
pub async fn resolve_season(
    provider: &dyn MetadataProvider,
    entry_id: u64,
    seasons: &[SeasonDescriptor],
    episode_number: u32,
) -> Result<Option<EpisodeMatch>> {
    for season in seasons {
        let record = provider
            .get_episode(entry_id, season.season_number, episode_number)
            .await?;

        if let Some(record) = record {
            tracing::debug!(
                "Episode {} confirmed in season {} of series {}",
                episode_number,
                season.season_number,
                entry_id
            );
            return Ok(Some(EpisodeMatch {
                season_number: season.season_number,
                episode_number,
                // An empty title is treated as no title.
                episode_title: record.name.filter(|name| !name.is_empty()),
            }));
        }
    }

    Ok(None)
}
