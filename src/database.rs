//! Database initialization and table definitions
//!
//! This module handles the setup of the embedded redb database and defines
//! the state handed to every request handler.

use redb::{Database, TableDefinition};
use std::sync::Arc;

use crate::error::Result;
use crate::store::UrlStore;

/// Main table holding every short link
///
/// Key: short code, which makes codes unique by construction
/// Value: JSON-serialized `ShortLink`
///
/// Example:
/// - Key: "aZ3kq9"
/// - Value: '{"id":1,"short_code":"aZ3kq9","original_url":"https://example.com",...}'
pub const TABLE_LINKS: TableDefinition<&str, &str> = TableDefinition::new("links_v1");

/// Small key/value table for store bookkeeping
///
/// Holds the id sequence under `NEXT_ID_KEY`.
pub const TABLE_META: TableDefinition<&str, u64> = TableDefinition::new("meta_v1");

/// Key in `TABLE_META` for the next id to hand out
pub const NEXT_ID_KEY: &str = "next_id";

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: UrlStore,

    /// Public base URL for `short_url`; derived from the `Host` header when unset
    pub base_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: UrlStore, base_url: Option<String>) -> Self {
        Self {
            store,
            base_url: base_url.map(|url| Arc::from(url.trim_end_matches('/'))),
        }
    }
}

/// Creates or opens the database file and makes sure both tables exist.
///
/// Safe to call against an already initialized file.
///
/// ```no_run
/// # use url_shortener::database::init_db;
/// let db = init_db("urls.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: &str) -> Result<Database> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_LINKS)?;
        write_txn.open_table(TABLE_META)?;
    }
    write_txn.commit()?;

    Ok(db)
}
