//! Runtime configuration read from `DOJO_*` environment variables.
//!
//! Every setting has a default, and a value that fails to parse falls back to
//! that default with a warning rather than stopping start-up.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::warn;

use crate::domain::record_store::DEFAULT_STORAGE_KEY;
use crate::domain::FeeTierPolicy;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:dojo.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Key the student snapshot is stored under
    pub storage_key: String,
    pub cors_origin: String,
    pub fee_tier_policy: FeeTierPolicy,
    /// Directory of a bundled presentation layer, served for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            fee_tier_policy: FeeTierPolicy::default(),
            static_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = match get("DOJO_BIND_ADDR") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Invalid DOJO_BIND_ADDR {:?} ({}), using {}", raw, e, DEFAULT_BIND_ADDR);
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let fee_tier_policy = match get("DOJO_FEE_TIER_POLICY") {
            Some(raw) => FeeTierPolicy::from_setting(&raw).unwrap_or_else(|| {
                warn!("Invalid DOJO_FEE_TIER_POLICY {:?}, using {:?}", raw, defaults.fee_tier_policy);
                defaults.fee_tier_policy
            }),
            None => defaults.fee_tier_policy,
        };

        Self {
            database_url: get("DOJO_DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr,
            storage_key: get("DOJO_STORAGE_KEY").unwrap_or(defaults.storage_key),
            cors_origin: get("DOJO_CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            fee_tier_policy,
            static_dir: get("DOJO_STATIC_DIR").map(PathBuf::from),
        }
    }
}
