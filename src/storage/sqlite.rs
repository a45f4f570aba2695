use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, Row, params};
use tracing::{debug, info};

use super::{LinkRecord, LinkStore};
use crate::errors::{CryptoLinkError, Result};

const COLUMNS: &str = "id, domain, encrypted_content, wrapped_key, expires_at, status, \
     domain_key, public_key, private_key, signature, use_count, operator, created_at";

/// SQLite-backed store. The connection is acquired once at construction and
/// held for the store's lifetime; the mutex serializes every statement, so
/// writes never interleave.
pub struct SqliteStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|e| {
            CryptoLinkError::database_connection(format!("cannot open database {}: {}", db_path, e))
        })?;

        let store = SqliteStore {
            connection: Arc::new(Mutex::new(conn)),
        };
        store.init_db()?;

        info!("SqliteStore ready, database path: {}", db_path);
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connection.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS short_links (
                id TEXT PRIMARY KEY,
                domain TEXT NOT NULL,
                encrypted_content TEXT NOT NULL,
                wrapped_key TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                status INTEGER NOT NULL,
                domain_key TEXT NOT NULL,
                public_key TEXT NOT NULL,
                private_key TEXT NOT NULL,
                signature TEXT NOT NULL,
                use_count INTEGER NOT NULL,
                operator TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_short_links_domain
                 ON short_links (domain, wrapped_key)",
            [],
        )?;

        Ok(())
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<LinkRecord> {
        Ok(LinkRecord {
            id: row.get(0)?,
            domain: row.get(1)?,
            encrypted_content: row.get(2)?,
            wrapped_key: row.get(3)?,
            expires_at: row.get(4)?,
            status: row.get(5)?,
            domain_key: row.get(6)?,
            public_key: row.get(7)?,
            private_key: row.get(8)?,
            signature: row.get(9)?,
            use_count: row.get(10)?,
            operator: row.get(11)?,
            created_at: row.get(12)?,
        })
    }
}

#[async_trait]
impl LinkStore for SqliteStore {
    async fn insert(&self, record: LinkRecord) -> Result<()> {
        let conn = self.connection.lock().unwrap();

        conn.execute(
            "INSERT INTO short_links VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                record.id,
                record.domain,
                record.encrypted_content,
                record.wrapped_key,
                record.expires_at,
                record.status,
                record.domain_key,
                record.public_key,
                record.private_key,
                record.signature,
                record.use_count,
                record.operator,
                record.created_at,
            ],
        )?;

        debug!(id = %record.id, domain = %record.domain, "link record inserted");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<LinkRecord>> {
        let conn = self.connection.lock().unwrap();

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM short_links WHERE id = ?1",
            COLUMNS
        ))?;

        match stmt.query_row(params![id], Self::record_from_row) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_domain_and_prefix(
        &self,
        domain: &str,
        prefix: &str,
    ) -> Result<Vec<LinkRecord>> {
        let conn = self.connection.lock().unwrap();

        // substr comparison instead of LIKE: the prefix is caller input and
        // must not be interpreted as a pattern.
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM short_links
                 WHERE domain = ?1 AND substr(wrapped_key, 1, length(?2)) = ?2
                 ORDER BY created_at",
            COLUMNS
        ))?;

        let rows = stmt.query_map(params![domain, prefix], Self::record_from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
