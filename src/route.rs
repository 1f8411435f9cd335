//! Route definitions for the URL shortener API

use axum::routing::{get, post};
use axum::Router;

use crate::database::AppState;
use crate::handler::{get_stats, health_check, list_urls, redirect_url, shorten_url};
use crate::middleware::cors_layer;

/// Creates the application router
///
/// # Route Definitions
///
/// - `POST /api/shorten` - Shortens a URL
/// - `GET /api/urls` - Lists every short URL, newest first
/// - `GET /api/stats` - Totals across the store
/// - `GET /api/health` - Liveness probe
/// - `GET /{short_code}` - Redirects to the original URL
///
/// ```no_run
/// # use url_shortener::database::{init_db, AppState};
/// # use url_shortener::route::create_app;
/// # use url_shortener::store::UrlStore;
/// # let db = init_db("urls.db").unwrap();
/// let state = AppState::new(UrlStore::new(db), None);
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/shorten", post(shorten_url))
        .route("/urls", get(list_urls))
        .route("/stats", get(get_stats))
        .route("/health", get(health_check));

    Router::new()
        .route("/{short_code}", get(redirect_url))
        .nest("/api", api_routes)
        .layer(cors_layer())
        .with_state(state)
}
