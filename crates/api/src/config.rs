use std::path::PathBuf;

use picshelf_core::upload::DEFAULT_MAX_UPLOAD_BYTES;

/// Where uploads and the database live by default.
///
/// Serverless hosts only allow writes under `/tmp`, which is wiped between
/// cold starts; everything else gets paths relative to the working
/// directory that survive restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProfile {
    Persistent,
    Ephemeral,
}

impl StorageProfile {
    /// Parse the `STORAGE_PROFILE` value. Unknown values fall back to
    /// [`StorageProfile::Persistent`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "ephemeral" | "tmp" => Self::Ephemeral,
            _ => Self::Persistent,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Persistent => "persistent",
            Self::Ephemeral => "ephemeral",
        }
    }

    pub fn default_upload_dir(self) -> &'static str {
        match self {
            Self::Persistent => "uploads",
            Self::Ephemeral => "/tmp/uploads",
        }
    }

    pub fn default_database_url(self) -> &'static str {
        match self {
            Self::Persistent => "sqlite://data/picshelf.db",
            Self::Ephemeral => "sqlite:///tmp/database.db",
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub storage_profile: StorageProfile,
    /// Storage directory for uploaded files.
    pub upload_dir: PathBuf,
    /// SQLite connection URL for the metadata store.
    pub database_url: String,
    /// Largest accepted request body in bytes (default: 16 MiB).
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                 |
    /// |------------------------|-----------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                               |
    /// | `PORT`                 | `3000`                                  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                    |
    /// | `STORAGE_PROFILE`      | `persistent`                            |
    /// | `UPLOAD_DIR`           | per profile (`uploads`, `/tmp/uploads`) |
    /// | `DATABASE_URL`         | per profile                             |
    /// | `MAX_UPLOAD_BYTES`     | `16777216`                              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage_profile = std::env::var("STORAGE_PROFILE")
            .map(|v| StorageProfile::from_name(&v))
            .unwrap_or(StorageProfile::Persistent);

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(storage_profile.default_upload_dir()));

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| storage_profile.default_database_url().into());

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .map(|v| v.parse().expect("MAX_UPLOAD_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            host,
            port,
            request_timeout_secs,
            storage_profile,
            upload_dir,
            database_url,
            max_upload_bytes,
        }
    }
}
