use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::VideoListing,
};

/// Upstream movie catalog operations. The production implementation talks
/// to TMDB; tests substitute a double.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Trending movies, weekly window. Returned as fetched.
    async fn trending(&self) -> AppResult<Value>;

    /// Search the catalog for `query`, forwarded verbatim. Returned as fetched.
    async fn search(&self, query: &str) -> AppResult<Value>;

    /// Videos for one movie, as fetched. Callers apply [`filter_youtube`]
    /// before responding.
    async fn movie_videos(&self, movie_id: i64) -> AppResult<VideoListing>;
}

pub struct TmdbClient {
    http: Client,
    config: CatalogConfig,
}

impl TmdbClient {
    pub fn new(config: CatalogConfig) -> anyhow::Result<Self> {
        // One shared client; every request inherits the configured timeout.
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(TmdbClient { http, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(upstream_error)?
            .error_for_status()
            .map_err(upstream_error)?;

        response.json::<T>().await.map_err(upstream_error)
    }
}

// The request URL carries the API key as a query parameter; strip the URL
// from the error before it reaches logs or clients.
fn upstream_error(err: reqwest::Error) -> AppError {
    AppError::Upstream(err.without_url().to_string())
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn trending(&self) -> AppResult<Value> {
        self.get_json("trending/movie/week", &[]).await
    }

    async fn search(&self, query: &str) -> AppResult<Value> {
        self.get_json("search/movie", &[("query", query)]).await
    }

    async fn movie_videos(&self, movie_id: i64) -> AppResult<VideoListing> {
        self.get_json(&format!("movie/{}/videos", movie_id), &[("language", "en-US")])
            .await
    }
}

/// Keep only YouTube-hosted entries, preserving their relative order. The
/// rest of the envelope is untouched.
pub fn filter_youtube(mut listing: VideoListing) -> VideoListing {
    listing.results.retain(|video| video.site == "YouTube");
    listing
}
