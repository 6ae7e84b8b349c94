//! GitHub client for release metadata and raw file content.
//!
//! This module provides:
//!
//! - `GitHubClient`: HTTP client wrapper with rate limit tracking
//! - `Release`: the subset of the releases API payload the homepage shows
//! - `FetchError`: the failure taxonomy every fetching widget reports
//!
//! Non-2xx responses are never parsed; their status code is carried in
//! `FetchError::HttpStatus` instead.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

/// GitHub API base URL
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// User agent for API requests
const USER_AGENT: &str = concat!("ollama4j-home/", env!("CARGO_PKG_VERSION"));

/// Why a remote resource could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure (DNS, refused connection, reset)
    #[error("{0}")]
    Network(String),
    /// A response arrived with a non-2xx status
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),
    /// The body could not be decoded as the expected JSON
    #[error("{0}")]
    Parse(String),
}

impl FetchError {
    /// HTTP status code, when the failure came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_decode() {
        return FetchError::Parse(err.to_string());
    }
    FetchError::Network(err.to_string())
}

/// A GitHub release descriptor.
///
/// The releases API sends `null` for an untitled release's `name` and for a
/// draft's `published_at`, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Release {
    /// Release title, falling back to the tag when the title is missing or blank
    pub fn version(&self) -> &str {
        [&self.name, &self.tag_name]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }

    /// Calendar date of publication, if `published_at` is a valid RFC 3339 timestamp
    pub fn published_date(&self) -> Option<NaiveDate> {
        let published_at = self.published_at.as_deref()?;
        DateTime::parse_from_rfc3339(published_at)
            .ok()
            .map(|dt| dt.date_naive())
    }

    /// Long-form publish date such as "March 5, 2025".
    /// Falls back to the raw timestamp when it cannot be parsed; `None` for drafts.
    pub fn release_date_label(&self) -> Option<String> {
        match self.published_date() {
            Some(date) => Some(date.format("%B %-d, %Y").to_string()),
            None => self.published_at.clone(),
        }
    }
}

/// GitHub API rate limit information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in current window
    pub remaining: Option<u32>,
    /// Unix timestamp when limit resets
    pub reset_at: Option<i64>,
}

impl RateLimitInfo {
    /// Parse rate limit info from response headers
    fn from_response(response: &reqwest::Response) -> Self {
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            remaining: header("x-ratelimit-remaining").and_then(|s| s.parse().ok()),
            reset_at: header("x-ratelimit-reset").and_then(|s| s.parse().ok()),
        }
    }

    /// Check if rate limit is low (<=10 remaining)
    pub fn is_low(&self) -> bool {
        self.remaining.map(|r| r <= 10).unwrap_or(false)
    }

    /// Minutes until the limit window resets
    pub fn reset_in_minutes(&self) -> Option<i64> {
        self.reset_at.map(|reset| {
            let now = chrono::Utc::now().timestamp();
            ((reset - now) / 60).max(0)
        })
    }
}

/// Result of a GitHub API fetch including rate limit info
#[derive(Debug, Clone)]
pub struct FetchResult<T> {
    pub data: T,
    pub rate_limit: RateLimitInfo,
}

/// GitHub HTTP client
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
}

impl GitHubClient {
    /// Create a client against the public GitHub API
    pub fn new() -> anyhow::Result<Self> {
        Self::with_api_base(GITHUB_API_BASE)
    }

    /// Create a client against a different API root (GitHub Enterprise, test servers)
    pub fn with_api_base(api_base: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the latest-release endpoint for `owner/repo`
    pub fn latest_release_url(&self, repository: &str) -> String {
        format!("{}/repos/{}/releases/latest", self.api_base, repository)
    }

    /// Fetch and decode a release descriptor from `url`
    pub async fn get_release(&self, url: &str) -> Result<FetchResult<Release>, FetchError> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let rate_limit = RateLimitInfo::from_response(&response);

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        let release: Release =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        tracing::info!(
            "Fetched release {} in {:.1}s",
            release.version(),
            start.elapsed().as_secs_f32()
        );

        Ok(FetchResult { data: release, rate_limit })
    }

    /// Fetch the latest release of `owner/repo`
    pub async fn get_latest_release(
        &self,
        repository: &str,
    ) -> Result<FetchResult<Release>, FetchError> {
        self.get_release(&self.latest_release_url(repository)).await
    }

    /// Fetch a raw text file. Any 2xx body is accepted as-is.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let text = response.text().await.map_err(map_reqwest_error)?;
        tracing::debug!("Fetched {} bytes from {}", text.len(), url);
        Ok(text)
    }
}
