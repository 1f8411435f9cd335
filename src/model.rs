//! Data models for the URL shortener
//!
//! `ShortLink` is what the store persists; the remaining types are the
//! request and response bodies of the JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted short link
///
/// Everything except `clicks` is fixed at insertion time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    /// Store-assigned sequence number, starts at 1 and is never reused
    pub id: u64,

    pub short_code: String,

    pub original_url: String,

    /// Successful redirects through this code
    #[serde(default)]
    pub clicks: u64,

    pub created_at: DateTime<Utc>,
}

/// Totals across the whole store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_count: u64,
    pub total_clicks: u64,
}

/// Request payload for `POST /api/shorten`
///
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
#[derive(Deserialize, Debug, Default)]
pub struct ShortenRequest {
    /// Absent is reported as a validation error, not a decode failure
    pub url: Option<String>,
}

/// Response returned after a successful shorten
#[derive(Serialize, Deserialize, Debug)]
pub struct ShortenResponse {
    pub success: bool,
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
}

/// One entry of `GET /api/urls`
#[derive(Serialize, Deserialize, Debug)]
pub struct LinkResponse {
    pub id: u64,
    pub short_code: String,
    pub original_url: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
    pub short_url: String,
}

impl LinkResponse {
    pub fn new(link: ShortLink, base_url: &str) -> Self {
        let short_url = format!("{}/{}", base_url, link.short_code);
        Self {
            id: link.id,
            short_code: link.short_code,
            original_url: link.original_url,
            clicks: link.clicks,
            created_at: link.created_at,
            short_url,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct StatsResponse {
    pub total_urls: u64,
    pub total_clicks: u64,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            total_urls: stats.total_count,
            total_clicks: stats.total_clicks,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}
