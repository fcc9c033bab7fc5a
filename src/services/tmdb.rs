//! TMDB API client.

use crate::models::catalog::{CatalogEntry, EpisodeRecord, SeasonDescriptor};
use crate::services::MetadataProvider;
use crate::Result;
use serde::Deserialize;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    pub language: String,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
}

impl TmdbConfig {
    /// Create config from environment variable.
    /// Supports both API key (v3) and Bearer token (v4) formats.
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("TMDB_API_KEY").map_err(|_| crate::Error::TmdbApiKeyMissing)?;

        Ok(Self::with_key(api_key, "zh-CN".to_string()))
    }

    /// Create config from the loaded application settings.
    pub fn from_settings(settings: &crate::models::config::TmdbConfig) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .ok_or(crate::Error::TmdbApiKeyMissing)?;

        Ok(Self::with_key(api_key, settings.language.clone()))
    }

    fn with_key(api_key: String, language: String) -> Self {
        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");
        Self {
            api_key,
            language,
            use_bearer,
        }
    }
}

/// TMDB API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

/// TV show search result.
#[derive(Debug, Deserialize)]
struct TvSearchResult {
    results: Vec<TvSearchItem>,
}

/// TV show search item.
#[derive(Debug, Deserialize)]
struct TvSearchItem {
    id: u64,
    name: String,
}

/// TV show details, reduced to the season list.
#[derive(Debug, Deserialize)]
struct TvDetails {
    seasons: Vec<SeasonItem>,
}

/// Season info within TV details.
#[derive(Debug, Deserialize)]
struct SeasonItem {
    season_number: u16,
    name: String,
}

/// Episode details.
#[derive(Debug, Deserialize)]
struct EpisodeDetails {
    id: u64,
    name: Option<String>,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Create a new TMDB client from environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(TmdbConfig::from_env()?))
    }

    /// Create a new TMDB client from the loaded application settings.
    pub fn from_settings(settings: &crate::models::config::TmdbConfig) -> Result<Self> {
        Ok(Self::new(TmdbConfig::from_settings(settings)?))
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.config.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request
        }
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    fn build_url(&self, path: &str, extra_params: &str) -> String {
        if self.config.use_bearer {
            format!(
                "{}/{}?language={}{}",
                TMDB_BASE_URL, path, self.config.language, extra_params
            )
        } else {
            format!(
                "{}/{}?api_key={}&language={}{}",
                TMDB_BASE_URL, path, self.config.api_key, self.config.language, extra_params
            )
        }
    }

    /// Verify API key is valid.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = if self.config.use_bearer {
            format!("{}/authentication", TMDB_BASE_URL)
        } else {
            format!(
                "{}/authentication?api_key={}",
                TMDB_BASE_URL, self.config.api_key
            )
        };

        match self.build_request(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    async fn search_by_title(&self, query: &str) -> Result<Vec<CatalogEntry>> {
        let url = self.build_url(
            "search/tv",
            &format!("&query={}&include_adult=false", urlencoding::encode(query)),
        );

        let resp: TvSearchResult = self
            .build_request(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp
            .results
            .into_iter()
            .map(|item| CatalogEntry {
                id: item.id,
                display_name: item.name,
            })
            .collect())
    }

    async fn list_seasons(&self, entry_id: u64) -> Result<Vec<SeasonDescriptor>> {
        let url = self.build_url(&format!("tv/{}", entry_id), "");

        let resp: TvDetails = self
            .build_request(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp
            .seasons
            .into_iter()
            .map(|season| SeasonDescriptor {
                season_number: season.season_number,
                name: season.name,
            })
            .collect())
    }

    async fn get_episode(
        &self,
        entry_id: u64,
        season_number: u16,
        episode_number: u32,
    ) -> Result<Option<EpisodeRecord>> {
        let url = self.build_url(
            &format!(
                "tv/{}/season/{}/episode/{}",
                entry_id, season_number, episode_number
            ),
            "",
        );

        let resp = self.build_request(&url).send().await?;

        // 404 means the episode does not exist in this season.
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let details: EpisodeDetails = resp.error_for_status()?.json().await?;
        Ok(Some(EpisodeRecord {
            id: details.id,
            name: details.name,
        }))
    }
}
