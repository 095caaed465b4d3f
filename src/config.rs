//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The presence of `MONGODB_URI` selects
//! the document-store backend; its absence selects the file backend
//! unconditionally.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// MongoDB connection string. `None` disables the primary backend.
    pub mongodb_uri: Option<String>,

    /// Database name. `None` uses the default database from the URI.
    pub mongodb_db: Option<String>,

    /// Collection holding waitlist entries.
    pub mongodb_collection: String,

    /// Path of the fallback JSON store.
    pub data_file: PathBuf,

    /// Directory with the landing page assets.
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let mongodb_uri = non_empty_env("MONGODB_URI");
        let mongodb_db = non_empty_env("MONGODB_DB");
        let mongodb_collection =
            std::env::var("MONGODB_COLLECTION").unwrap_or_else(|_| "waitlist".to_string());

        let data_file = PathBuf::from(
            std::env::var("WAITLIST_DATA_FILE")
                .unwrap_or_else(|_| "data/waitlist.json".to_string()),
        );

        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()));

        Ok(Self {
            listen_addr,
            mongodb_uri,
            mongodb_db,
            mongodb_collection,
            data_file,
            static_dir,
        })
    }
}

/// Reads an environment variable, treating unset and empty as `None`.
fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
