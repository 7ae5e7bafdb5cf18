//! Application state shared across handlers

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::ImageStore;
use shared::AppError;

/// Shared application state
///
/// Cloned per request (everything inside is cheap to clone: pool and S3
/// client are handle types).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// S3-backed product image store
    pub images: ImageStore,
}

impl AppState {
    /// Assemble state from parts (used directly by tests)
    pub fn new(config: Config, pool: SqlitePool, images: ImageStore) -> Self {
        Self {
            config,
            pool,
            images,
        }
    }

    /// Initialize state for a running server: database, migrations, image
    /// store. Fails (and the process exits) when the database cannot be
    /// opened or storage settings are incomplete — the latter was already
    /// checked by `Config::from_env`.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config.ensure_data_dir()?;

        let db = DbService::new(&config.database_path).await?;
        let images = ImageStore::initialize(config).await;

        Ok(Self::new(config.clone(), db.pool, images))
    }
}
