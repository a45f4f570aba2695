use std::env;

use cryptolink::config::ServiceConfig;
use cryptolink::storage::{LinkRecord, LinkStore, STATUS_ACTIVE, StoreFactory};

fn sample_record(id: &str, domain: &str, wrapped_key: &str) -> LinkRecord {
    LinkRecord {
        id: id.to_string(),
        domain: domain.to_string(),
        encrypted_content: "00112233".to_string(),
        wrapped_key: wrapped_key.to_string(),
        expires_at: "2099-01-01T00:00:00+00:00".to_string(),
        status: STATUS_ACTIVE,
        domain_key: "6162636465666768696a6b6c6d6e6f70".to_string(),
        public_key: "04ab".to_string(),
        private_key: "cd".to_string(),
        signature: "ef".to_string(),
        use_count: 0,
        operator: None,
        created_at: "2026-01-01T00:00:00+00:00".to_string(),
    }
}

// Both factory branches live in one test: the backend selector is process
// environment and tests in this binary run in parallel.
#[tokio::test]
async fn test_store_factory_backend_selection() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServiceConfig {
        db_path: dir.path().join("links.db").to_str().unwrap().to_string(),
        default_valid_hours: 24,
    };

    unsafe { env::set_var("CRYPTOLINK_STORE_BACKEND", "memory") };
    let store = StoreFactory::create(&config).unwrap();
    assert_eq!(store.backend_name(), "memory");

    unsafe { env::remove_var("CRYPTOLINK_STORE_BACKEND") };
    let store = StoreFactory::create(&config).unwrap();
    assert_eq!(store.backend_name(), "sqlite");
}

#[tokio::test]
async fn test_backends_share_the_lookup_contract() {
    let dir = tempfile::tempdir().unwrap();

    let sqlite: Box<dyn LinkStore> = Box::new(
        cryptolink::storage::sqlite::SqliteStore::open(
            dir.path().join("contract.db").to_str().unwrap(),
        )
        .unwrap(),
    );
    let memory: Box<dyn LinkStore> = Box::new(cryptolink::storage::memory::MemoryStore::new());

    for store in [&sqlite, &memory] {
        store
            .insert(sample_record("id-1", "a.example", "02aabbccdd001122"))
            .await
            .unwrap();
        store
            .insert(sample_record("id-2", "b.example", "02aabbccdd334455"))
            .await
            .unwrap();

        let hits = store
            .find_by_domain_and_prefix("a.example", "02aabbcc")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1, "{} backend", store.backend_name());
        assert_eq!(hits[0].id, "id-1");

        // wrong domain, right prefix
        let hits = store
            .find_by_domain_and_prefix("c.example", "02aabbcc")
            .await
            .unwrap();
        assert!(hits.is_empty(), "{} backend", store.backend_name());

        assert!(store.get("id-2").await.unwrap().is_some());
        assert!(store.get("id-3").await.unwrap().is_none());
    }
}
