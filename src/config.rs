//! Service configuration
//!
//! The service takes an explicit configuration object at construction time
//! instead of reading process-wide singletons. Every field can be overridden
//! through the environment for deployments that configure via env vars.

use std::env;

use serde::{Deserialize, Serialize};

/// Default validity window for newly created links, in hours.
pub const DEFAULT_VALID_HOURS: i64 = 24;

/// Configuration for a [`ShortLinkService`](crate::service::ShortLinkService)
/// instance and the store it connects to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Path of the SQLite database file used by the default store backend.
    pub db_path: String,
    /// Validity window applied when `create` is called without an explicit
    /// number of hours.
    pub default_valid_hours: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            db_path: "cryptolink.db".to_string(),
            default_valid_hours: DEFAULT_VALID_HOURS,
        }
    }
}

impl ServiceConfig {
    /// Build a configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `CRYPTOLINK_DB_PATH`, `CRYPTOLINK_VALID_HOURS`.
    pub fn from_env() -> Self {
        let defaults = ServiceConfig::default();

        let db_path = env::var("CRYPTOLINK_DB_PATH").unwrap_or(defaults.db_path);
        let default_valid_hours = env::var("CRYPTOLINK_VALID_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(defaults.default_valid_hours);

        ServiceConfig {
            db_path,
            default_valid_hours,
        }
    }
}
