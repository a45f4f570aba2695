//! Cryptolink - a short-link service with an encrypted persistence format
//!
//! Long URLs are mapped to short addresses of the form
//! `"{domain}/{8 hex chars}"`, but the mapping is stored encrypted, signed
//! and time-limited instead of as plaintext: each link gets its own symmetric
//! content key, the key is wrapped under a per-service elliptic-curve key
//! pair, and a canonical digest over the record's semantic fields gates
//! resolution.
//!
//! # Architecture
//! - `crypto`: key pair, per-link keys, hybrid encryption, canonical signing
//! - `storage`: the link store trait and its SQLite / in-memory backends
//! - `service`: create/resolve orchestration
//! - `config`: explicit service configuration
//! - `errors`: unified error taxonomy
//! - `logging`: tracing subscriber setup for embedders

pub mod config;
pub mod crypto;
pub mod errors;
pub mod logging;
pub mod service;
pub mod storage;
pub mod utils;

pub use config::ServiceConfig;
pub use errors::{CryptoLinkError, Result};
pub use service::ShortLinkService;
