//! Durable keyed storage for link records
//!
//! One table keyed by record id, with a secondary lookup path by domain and
//! short-code prefix. The core inserts records exactly once and reads them
//! back at resolution; it never updates or deletes.

use std::env;
use std::sync::Arc;

use async_trait::async_trait;

pub mod memory;
pub mod models;
pub mod sqlite;

pub use models::{LinkRecord, SHORT_CODE_LEN, STATUS_ACTIVE};

use crate::config::ServiceConfig;
use crate::errors::Result;

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Persist a new record. The id must not already exist.
    async fn insert(&self, record: LinkRecord) -> Result<()>;

    /// Fetch a record by primary key.
    async fn get(&self, id: &str) -> Result<Option<LinkRecord>>;

    /// All records for `domain` whose wrapped key hex starts with `prefix`,
    /// oldest first. Prefix matching means several records can share a short
    /// code; the caller disambiguates.
    async fn find_by_domain_and_prefix(&self, domain: &str, prefix: &str)
    -> Result<Vec<LinkRecord>>;

    fn backend_name(&self) -> &'static str;
}

pub struct StoreFactory;

impl StoreFactory {
    /// Build the store backend selected by `CRYPTOLINK_STORE_BACKEND`
    /// (`sqlite`, the default, or `memory`).
    pub fn create(config: &ServiceConfig) -> Result<Arc<dyn LinkStore>> {
        let backend = env::var("CRYPTOLINK_STORE_BACKEND").unwrap_or_else(|_| "sqlite".into());

        let boxed: Box<dyn LinkStore> = match backend.as_str() {
            "memory" => Box::new(memory::MemoryStore::new()),
            _ => Box::new(sqlite::SqliteStore::open(&config.db_path)?),
        };

        Ok(Arc::from(boxed))
    }
}
