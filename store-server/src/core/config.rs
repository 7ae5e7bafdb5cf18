//! Server configuration
//!
//! All settings come from environment variables (a `.env` file is loaded in
//! `main`). Storage settings have no defaults: the image store cannot run
//! without them, so a missing value aborts startup.
//!
//! | Variable | Default | Notes |
//! |----------|---------|-------|
//! | DATABASE_PATH | data/store.db | SQLite file, parent dir created on boot |
//! | HTTP_PORT | 3000 | |
//! | ENVIRONMENT | development | development / staging / production |
//! | STORAGE_BUCKET | — | required |
//! | STORAGE_PUBLIC_BASE_URL | — | required, public prefix for uploaded images |

use shared::AppError;
use std::path::Path;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// S3 bucket for product images
    pub storage_bucket: String,
    /// Public base URL prefix for uploaded images
    pub storage_public_base_url: String,
}

impl Config {
    /// Require an env var: missing or empty is a fatal startup error
    fn require(name: &str) -> Result<String, AppError> {
        match std::env::var(name) {
            Ok(v) if !v.is_empty() => Ok(v),
            _ => Err(AppError::internal(format!("{name} must be set"))),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/store.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            storage_bucket: Self::require("STORAGE_BUCKET")?,
            storage_public_base_url: Self::require("STORAGE_PUBLIC_BASE_URL")?,
        })
    }

    /// Make sure the database directory exists
    pub fn ensure_data_dir(&self) -> Result<(), AppError> {
        if let Some(parent) = Path::new(&self.database_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::internal(format!(
                        "Failed to create data directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
