//! Server State
//!
//! [`ServerState`] holds the shared references every handler needs: the
//! configuration and the database service. Cloning is cheap (the pool is
//! internally reference-counted), and handlers receive it through axum's
//! `State` extractor.

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// Database service
    pub db: DbService,
}

impl ServerState {
    /// Initialize all services from configuration
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;

        tracing::info!(
            database = %config.database_path,
            timezone = %config.timezone,
            "Server state initialized"
        );

        Ok(Self {
            config: config.clone(),
            db,
        })
    }

    /// Shorthand for the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
