//! Persistent short link store
//!
//! Every mutation runs inside a single redb write transaction. redb admits
//! one writer at a time, so the existence check and insert in `create`, and
//! the read-modify-write in `lookup_and_increment`, cannot interleave with
//! another request.

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable};
use std::sync::Arc;

use crate::database::{NEXT_ID_KEY, TABLE_LINKS, TABLE_META};
use crate::error::{AppError, Result};
use crate::generator::{CodeGenerator, RandomCodeGenerator};
use crate::model::{ShortLink, Stats};

/// Candidate codes tried by `create` before giving up
pub const MAX_ATTEMPTS: usize = 5;

/// Handle to the short link table, cheap to clone
#[derive(Clone)]
pub struct UrlStore {
    db: Arc<Database>,
    generator: Arc<dyn CodeGenerator>,
}

impl UrlStore {
    /// Store backed by `db` generating random codes.
    pub fn new(db: Database) -> Self {
        Self::with_generator(db, RandomCodeGenerator)
    }

    pub fn with_generator(db: Database, generator: impl CodeGenerator) -> Self {
        Self {
            db: Arc::new(db),
            generator: Arc::new(generator),
        }
    }

    /// Persists a new link for `original_url` under a freshly generated code.
    ///
    /// Rejects URLs that are empty or not http(s) with `InvalidUrl` before
    /// touching the database. Each attempt draws a new candidate; if all
    /// `MAX_ATTEMPTS` candidates are taken the call fails with
    /// `CollisionExhausted` and nothing is written.
    pub fn create(&self, original_url: &str) -> Result<ShortLink> {
        validate_url(original_url)?;

        for attempt in 1..=MAX_ATTEMPTS {
            let code = self.generator.generate();
            if let Some(link) = self.try_insert(&code, original_url)? {
                tracing::debug!(short_code = %link.short_code, id = link.id, "short link created");
                return Ok(link);
            }
            tracing::debug!(short_code = %code, attempt, "short code collision, retrying");
        }

        tracing::warn!(attempts = MAX_ATTEMPTS, "no free short code within retry budget");
        Err(AppError::CollisionExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Inserts under `code` unless it is taken. `None` means collision.
    fn try_insert(&self, code: &str, original_url: &str) -> Result<Option<ShortLink>> {
        let write_txn = self.db.begin_write()?;
        let link = {
            let mut links = write_txn.open_table(TABLE_LINKS)?;
            if links.get(code)?.is_some() {
                None
            } else {
                let mut meta = write_txn.open_table(TABLE_META)?;
                let id = meta.get(NEXT_ID_KEY)?.map(|guard| guard.value()).unwrap_or(1);
                meta.insert(NEXT_ID_KEY, id + 1)?;

                let link = ShortLink {
                    id,
                    short_code: code.to_string(),
                    original_url: original_url.to_string(),
                    clicks: 0,
                    created_at: Utc::now(),
                };
                let record_json = serde_json::to_string(&link)?;
                links.insert(code, record_json.as_str())?;
                Some(link)
            }
        };

        match link {
            Some(link) => {
                write_txn.commit()?;
                Ok(Some(link))
            }
            None => {
                write_txn.abort()?;
                Ok(None)
            }
        }
    }

    /// Resolves `short_code` and counts the visit.
    ///
    /// Returns `NotFound` for unknown codes, leaving the store untouched.
    pub fn lookup_and_increment(&self, short_code: &str) -> Result<String> {
        let write_txn = self.db.begin_write()?;
        let original_url = {
            let mut links = write_txn.open_table(TABLE_LINKS)?;
            let existing = links
                .get(short_code)?
                .map(|guard| guard.value().to_string());

            match existing {
                Some(record_json) => {
                    let mut link: ShortLink = serde_json::from_str(&record_json)?;
                    link.clicks = link.clicks.saturating_add(1);
                    let updated = serde_json::to_string(&link)?;
                    links.insert(short_code, updated.as_str())?;
                    Some(link.original_url)
                }
                None => None,
            }
        };

        match original_url {
            Some(url) => {
                write_txn.commit()?;
                Ok(url)
            }
            None => {
                write_txn.abort()?;
                Err(AppError::NotFound)
            }
        }
    }

    /// Reads a link without counting a visit.
    pub fn get(&self, short_code: &str) -> Result<Option<ShortLink>> {
        let read_txn = self.db.begin_read()?;
        let links = read_txn.open_table(TABLE_LINKS)?;

        let link = links
            .get(short_code)?
            .map(|guard| serde_json::from_str::<ShortLink>(guard.value()))
            .transpose()?;
        Ok(link)
    }

    /// Every link, newest first.
    pub fn list_all(&self) -> Result<Vec<ShortLink>> {
        let mut links = self.read_all()?;
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(links)
    }

    pub fn aggregate_stats(&self) -> Result<Stats> {
        let stats = self
            .read_all()?
            .iter()
            .fold(Stats::default(), |acc, link| Stats {
                total_count: acc.total_count + 1,
                total_clicks: acc.total_clicks.saturating_add(link.clicks),
            });
        Ok(stats)
    }

    fn read_all(&self) -> Result<Vec<ShortLink>> {
        let read_txn = self.db.begin_read()?;
        let links = read_txn.open_table(TABLE_LINKS)?;

        links
            .iter()?
            .map(|entry| -> Result<ShortLink> {
                let (_, value) = entry?;
                Ok(serde_json::from_str(value.value())?)
            })
            .collect()
    }
}

/// Accepts only non-empty `http://` or `https://` URLs.
pub fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(AppError::InvalidUrl("URL is required".to_string()));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AppError::InvalidUrl(
            "Invalid URL. Must start with http:// or https://".to_string(),
        ));
    }
    Ok(())
}
