//! Short-link orchestration
//!
//! Creation runs key generation -> content encryption -> key wrapping ->
//! canonical signing -> store insert. Resolution runs store lookup -> expiry
//! check -> key unwrap -> content decryption -> signature verification.
//! Every failure is terminal for the call; nothing is retried internally.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::crypto::{KeyPair, SymmetricKey, hybrid, signature};
use crate::errors::{CryptoLinkError, Result};
use crate::storage::{LinkRecord, LinkStore, STATUS_ACTIVE, StoreFactory};
use crate::utils::extract_domain;

/// Service facade over the encryption pipeline and the link store.
///
/// The asymmetric key pair is generated once at construction and shared by
/// every link this instance creates; it is read-only afterwards, so the
/// service can be used concurrently. The store serializes its own writes.
pub struct ShortLinkService {
    key_pair: KeyPair,
    store: Arc<dyn LinkStore>,
    config: ServiceConfig,
}

impl ShortLinkService {
    /// Build a service around an existing store.
    pub fn new(store: Arc<dyn LinkStore>, config: ServiceConfig) -> Result<Self> {
        let key_pair = KeyPair::generate()?;
        info!(backend = store.backend_name(), "short link service ready");

        Ok(ShortLinkService {
            key_pair,
            store,
            config,
        })
    }

    /// Build a service and its store from configuration.
    pub fn connect(config: ServiceConfig) -> Result<Self> {
        let store = StoreFactory::create(&config)?;
        Self::new(store, config)
    }

    pub fn store(&self) -> &Arc<dyn LinkStore> {
        &self.store
    }

    /// Create a short link for `long_url`, valid for `valid_hours` (the
    /// configured default when `None`). Returns the short address
    /// `"{domain}/{8 hex chars}"`.
    pub async fn create(
        &self,
        long_url: &str,
        valid_hours: Option<i64>,
        operator: Option<&str>,
    ) -> Result<String> {
        let domain = extract_domain(long_url);

        let key = SymmetricKey::generate();
        let encrypted_content = hybrid::encrypt_content(long_url, &key);
        let wrapped_key = hex::encode(hybrid::wrap_key(&key, self.key_pair.public_key())?);

        let now = Utc::now();
        let created_at = now.to_rfc3339();
        let hours = valid_hours.unwrap_or(self.config.default_valid_hours);
        let expires_at = (now + Duration::hours(hours)).to_rfc3339();

        let fields = signature_fields(&domain, long_url, &created_at, &key.to_hex());
        let signature = signature::sign(&fields);

        let record = LinkRecord {
            id: Uuid::new_v4().to_string(),
            domain: domain.clone(),
            encrypted_content: hex::encode(encrypted_content),
            wrapped_key: wrapped_key.clone(),
            expires_at,
            status: STATUS_ACTIVE,
            domain_key: key.to_hex(),
            public_key: self.key_pair.public_key_hex(),
            private_key: self.key_pair.private_key_hex(),
            signature,
            use_count: 0,
            operator: operator.map(str::to_string),
            created_at,
        };
        let short_address = record.short_address();

        self.store.insert(record).await?;

        info!(%domain, %short_address, "short link created");
        Ok(short_address)
    }

    /// Resolve a short address back to the original URL.
    ///
    /// Short codes are wrapped-key prefixes and therefore not unique. Every
    /// record matching the prefix is tried in store order and the first one
    /// that decrypts and verifies wins; only when none does is the first
    /// candidate's failure surfaced.
    pub async fn resolve(&self, short_address: &str) -> Result<String> {
        let (domain, code) = short_address.split_once('/').ok_or_else(|| {
            CryptoLinkError::malformed_address(format!(
                "short address '{}' has no '/' separator",
                short_address
            ))
        })?;

        let candidates = self.store.find_by_domain_and_prefix(domain, code).await?;
        if candidates.is_empty() {
            return Err(CryptoLinkError::not_found(format!(
                "no link stored for {}/{}",
                domain, code
            )));
        }

        let mut first_error: Option<CryptoLinkError> = None;
        for record in &candidates {
            match self.resolve_record(record) {
                Ok(long_url) => {
                    debug!(id = %record.id, "short link resolved");
                    return Ok(long_url);
                }
                Err(e) => {
                    warn!(id = %record.id, error = %e, "candidate record failed to resolve");
                    first_error.get_or_insert(e);
                }
            }
        }

        Err(first_error
            .unwrap_or_else(|| CryptoLinkError::not_found(format!("no link for {}", short_address))))
    }

    /// Run the full decrypt-and-verify pipeline against a single record.
    fn resolve_record(&self, record: &LinkRecord) -> Result<String> {
        let expires_at = DateTime::parse_from_rfc3339(&record.expires_at)
            .map_err(|e| {
                CryptoLinkError::integrity(format!("stored expiry is not a valid timestamp: {}", e))
            })?
            .with_timezone(&Utc);
        if Utc::now() >= expires_at {
            return Err(CryptoLinkError::expired(format!(
                "link expired at {}",
                record.expires_at
            )));
        }

        let envelope = hex::decode(&record.wrapped_key).map_err(|e| {
            CryptoLinkError::asymmetric_decrypt(format!("wrapped key is not valid hex: {}", e))
        })?;
        let key = hybrid::unwrap_key(&envelope, self.key_pair.secret_key())?;

        let ciphertext = hex::decode(&record.encrypted_content).map_err(|e| {
            CryptoLinkError::symmetric_decrypt(format!("stored content is not valid hex: {}", e))
        })?;
        let long_url = hybrid::decrypt_content(&ciphertext, &key)?;

        // The stored plaintext key must agree with the unwrapped one, else
        // the record was modified after insertion.
        if record.domain_key != key.to_hex() {
            return Err(CryptoLinkError::integrity(
                "stored symmetric key does not match the unwrapped key",
            ));
        }

        // Signature is recomputed over decrypted values, never over stored
        // ciphertext.
        let fields = signature_fields(&record.domain, &long_url, &record.created_at, &key.to_hex());
        if !signature::verify(&fields, &record.signature) {
            return Err(CryptoLinkError::integrity(
                "signature mismatch over decrypted record fields",
            ));
        }

        Ok(long_url)
    }
}

/// The exact field set signed at creation and re-derived at resolution.
fn signature_fields(
    domain: &str,
    content: &str,
    create_time: &str,
    domain_key_hex: &str,
) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    fields.insert("domain".to_string(), domain.to_string());
    fields.insert("content".to_string(), content.to_string());
    fields.insert("createTime".to_string(), create_time.to_string());
    fields.insert("domainKey".to_string(), domain_key_hex.to_string());
    fields
}
