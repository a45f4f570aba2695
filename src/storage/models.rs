use serde::{Deserialize, Serialize};

/// Active record status flag. Records are never transitioned automatically;
/// expiry is evaluated at resolution time instead.
pub const STATUS_ACTIVE: i32 = 1;

/// Number of hex characters of the wrapped key exposed as the short code.
pub const SHORT_CODE_LEN: usize = 8;

/// One persisted short link.
///
/// Written exactly once at creation and never mutated afterwards; the core
/// has no deletion path. All binary fields are stored hex encoded, and both
/// timestamps are stored as RFC3339 strings and parsed back at resolution.
///
/// The plaintext symmetric key and both halves of the service key pair are
/// persisted on the record, faithful to the source system. This defeats the
/// point of wrapping the key and is a known defect of the inherited design,
/// not a property to rely on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Primary key, a fresh UUIDv4 per record.
    pub id: String,
    /// Host portion extracted from the long URL.
    pub domain: String,
    /// Long URL encrypted under the symmetric key, hex encoded.
    pub encrypted_content: String,
    /// Symmetric key wrapped under the service public key, hex encoded.
    /// Its first [`SHORT_CODE_LEN`] characters form the short code.
    pub wrapped_key: String,
    /// RFC3339 expiry timestamp.
    pub expires_at: String,
    /// Active/inactive marker, see [`STATUS_ACTIVE`].
    pub status: i32,
    /// Plaintext symmetric key, hex encoded.
    pub domain_key: String,
    /// Service public key, SEC1 uncompressed hex.
    pub public_key: String,
    /// Service private key, big-endian scalar hex.
    pub private_key: String,
    /// Canonical digest over {domain, content, createTime, domainKey}.
    pub signature: String,
    /// Resolution counter. Nothing increments it in the current design.
    pub use_count: i64,
    /// Caller-supplied attribution, if any.
    pub operator: Option<String>,
    /// RFC3339 creation timestamp, part of the signature input.
    pub created_at: String,
}

impl LinkRecord {
    /// The short code this record is addressed by.
    pub fn short_code(&self) -> &str {
        let end = SHORT_CODE_LEN.min(self.wrapped_key.len());
        &self.wrapped_key[..end]
    }

    /// The externally visible short address.
    pub fn short_address(&self) -> String {
        format!("{}/{}", self.domain, self.short_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> LinkRecord {
        LinkRecord {
            id: "7b9f8f4e-0000-4000-8000-000000000000".to_string(),
            domain: "a.example".to_string(),
            encrypted_content: "00112233".to_string(),
            wrapped_key: "02aabbccddeeff00112233".to_string(),
            expires_at: "2026-01-02T00:00:00+00:00".to_string(),
            status: STATUS_ACTIVE,
            domain_key: "30303131323233333434353536363737".to_string(),
            public_key: "04ab".to_string(),
            private_key: "cd".to_string(),
            signature: "ef".to_string(),
            use_count: 0,
            operator: Some("alice".to_string()),
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_short_code_is_wrapped_key_prefix() {
        let record = sample_record();
        assert_eq!(record.short_code(), "02aabbcc");
        assert_eq!(record.short_address(), "a.example/02aabbcc");
    }

    #[test]
    fn test_short_code_handles_short_wrapped_key() {
        let mut record = sample_record();
        record.wrapped_key = "02aa".to_string();
        assert_eq!(record.short_code(), "02aa");
    }

    #[test]
    fn test_record_serde_round_trip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let restored: LinkRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, record.id);
        assert_eq!(restored.operator, record.operator);
        assert_eq!(restored.use_count, 0);
    }
}
