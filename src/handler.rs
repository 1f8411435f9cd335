//! HTTP request handlers for the URL shortener API
//!
//! Handlers stay thin: they decode the request, call into `UrlStore` and
//! turn the outcome into JSON or a redirect. Failures are `AppError`s and
//! render themselves.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::database::AppState;
use crate::error::{AppError, Result};
use crate::generator::is_valid_code;
use crate::model::{
    HealthResponse, LinkResponse, ShortenRequest, ShortenResponse, StatsResponse,
};

/// Base used for `short_url`: configured value, else `http://<Host>`
fn base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base) = &state.base_url {
        return base.to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|host| !host.is_empty())
        .unwrap_or("localhost");
    format!("http://{}", host)
}

/// Creates a new short URL
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
///
/// # Response
///
/// - **200 OK** - `{ success, short_url, short_code, original_url }`
/// - **400 Bad Request** - `url` missing or not http(s)
/// - **503 Service Unavailable** - no free code within the retry budget
pub async fn shorten_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>> {
    // A body that isn't a JSON object with `url` is the same client error as a missing field
    let url = payload
        .ok()
        .and_then(|Json(request)| request.url)
        .ok_or_else(|| AppError::InvalidUrl("URL is required".to_string()))?;

    let link = state.store.create(&url)?;

    Ok(Json(ShortenResponse {
        success: true,
        short_url: format!("{}/{}", base_url(&state, &headers), link.short_code),
        short_code: link.short_code,
        original_url: link.original_url,
    }))
}

/// Lists every short URL, newest first
pub async fn list_urls(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<LinkResponse>>> {
    let base = base_url(&state, &headers);
    let links = state
        .store
        .list_all()?
        .into_iter()
        .map(|link| LinkResponse::new(link, &base))
        .collect();

    Ok(Json(links))
}

/// Totals across the store
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.store.aggregate_stats()?;
    Ok(Json(stats.into()))
}

/// Redirects a short code to its original URL and counts the click
///
/// # Response
///
/// - **302 Found** - `Location` set to the original URL
/// - **404 Not Found** - `{ "error": "URL not found" }`
pub async fn redirect_url(
    path: std::result::Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response> {
    // Undecodable paths and anything not shaped like a generated code can't be stored
    let Ok(Path(short_code)) = path else {
        return Err(AppError::NotFound);
    };
    if !is_valid_code(&short_code) {
        return Err(AppError::NotFound);
    }

    let original_url = state.store.lookup_and_increment(&short_code)?;
    tracing::debug!(%short_code, %original_url, "redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location(&original_url))]).into_response())
}

/// Percent-encodes control bytes, space and non-ASCII so the result is
/// always a valid header value. Other characters, `%` included, pass through.
fn location(url: &str) -> String {
    let mut encoded = String::with_capacity(url.len());
    for byte in url.bytes() {
        if byte <= b' ' || byte >= 0x7F {
            encoded.push_str(&format!("%{:02X}", byte));
        } else {
            encoded.push(char::from(byte));
        }
    }
    encoded
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "URL Shortener API",
    })
}
