use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use super::{LinkRecord, LinkStore};
use crate::errors::{CryptoLinkError, Result};

/// In-memory store for tests and embedders that do not want a database file.
/// Same contract as the SQLite backend, nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, LinkRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn insert(&self, record: LinkRecord) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.id) {
            return Err(CryptoLinkError::database_operation(format!(
                "record id already exists: {}",
                record.id
            )));
        }

        debug!(id = %record.id, domain = %record.domain, "link record inserted");
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<LinkRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records.get(id).cloned())
    }

    async fn find_by_domain_and_prefix(
        &self,
        domain: &str,
        prefix: &str,
    ) -> Result<Vec<LinkRecord>> {
        let records = self.records.lock().unwrap();

        let mut hits: Vec<LinkRecord> = records
            .values()
            .filter(|r| r.domain == domain && r.wrapped_key.starts_with(prefix))
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(hits)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::STATUS_ACTIVE;

    fn sample_record(id: &str, created_at: &str) -> LinkRecord {
        LinkRecord {
            id: id.to_string(),
            domain: "a.example".to_string(),
            encrypted_content: "00112233".to_string(),
            wrapped_key: "02aabbccdd".to_string(),
            expires_at: "2099-01-01T00:00:00+00:00".to_string(),
            status: STATUS_ACTIVE,
            domain_key: "6162636465666768696a6b6c6d6e6f70".to_string(),
            public_key: "04ab".to_string(),
            private_key: "cd".to_string(),
            signature: "ef".to_string(),
            use_count: 0,
            operator: None,
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_get_and_duplicate() {
        let store = MemoryStore::new();
        store
            .insert(sample_record("id-1", "2026-01-01T00:00:00+00:00"))
            .await
            .unwrap();

        assert!(store.get("id-1").await.unwrap().is_some());
        assert!(store.get("id-2").await.unwrap().is_none());

        let err = store
            .insert(sample_record("id-1", "2026-01-01T00:00:00+00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, CryptoLinkError::DatabaseOperation(_)));
    }

    #[tokio::test]
    async fn test_prefix_matches_are_ordered_by_creation() {
        let store = MemoryStore::new();
        store
            .insert(sample_record("id-newer", "2026-01-02T00:00:00+00:00"))
            .await
            .unwrap();
        store
            .insert(sample_record("id-older", "2026-01-01T00:00:00+00:00"))
            .await
            .unwrap();

        let hits = store
            .find_by_domain_and_prefix("a.example", "02aabbcc")
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "id-older");
        assert_eq!(hits[1].id, "id-newer");
    }
}
