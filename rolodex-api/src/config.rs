//! API Configuration Module
//!
//! Server, store and CORS settings. Configuration is loaded from environment
//! variables with defaults suited to local development. No credentials are
//! read here; the LMDB store is a local directory.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{ApiError, ApiResult};

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

// ============================================================================
// STORE BACKEND
// ============================================================================

/// Which contact store the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process memory, lost on restart.
    Memory,
    /// LMDB environment on local disk.
    Lmdb,
}

impl FromStr for StoreBackend {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "lmdb" => Ok(StoreBackend::Lmdb),
            other => Err(ApiError::invalid_input(format!(
                "Unknown store backend '{}', expected 'memory' or 'lmdb'",
                other
            ))),
        }
    }
}

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind.
    pub bind_host: String,

    /// Port to listen on.
    pub port: u16,

    pub store: StoreBackend,

    /// Directory holding the LMDB environment.
    pub lmdb_path: PathBuf,

    /// LMDB map size in megabytes.
    pub lmdb_max_size_mb: usize,

    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            store: StoreBackend::Lmdb,
            lmdb_path: PathBuf::from("./data/contacts"),
            lmdb_max_size_mb: 64,
            cors_origins: Vec::new(), // Empty = allow all
            cors_max_age_secs: 86400,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `PORT`: Listen port (default: 5000)
    /// - `ROLODEX_API_BIND`: Bind interface (default: 0.0.0.0)
    /// - `ROLODEX_STORE`: "memory" or "lmdb" (default: lmdb)
    /// - `ROLODEX_LMDB_PATH`: LMDB directory (default: ./data/contacts)
    /// - `ROLODEX_LMDB_MAX_SIZE_MB`: LMDB map size (default: 64)
    /// - `ROLODEX_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `ROLODEX_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    ///
    /// # Errors
    /// Returns an error for an unparseable port or an unknown store backend.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", raw)))?,
            None => defaults.port,
        };

        let store = match lookup("ROLODEX_STORE") {
            Some(raw) => raw.parse()?,
            None => defaults.store,
        };

        let cors_origins = lookup("ROLODEX_CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_host: lookup("ROLODEX_API_BIND").unwrap_or(defaults.bind_host),
            port,
            store,
            lmdb_path: lookup("ROLODEX_LMDB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.lmdb_path),
            lmdb_max_size_mb: lookup("ROLODEX_LMDB_MAX_SIZE_MB")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.lmdb_max_size_mb),
            cors_origins,
            cors_max_age_secs: lookup("ROLODEX_CORS_MAX_AGE_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cors_max_age_secs),
        })
    }

    /// Resolve the socket address to bind.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>().map_err(|e| {
            ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e))
        })
    }

    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|allowed| allowed == origin)
    }
}
