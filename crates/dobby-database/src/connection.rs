//! Opening the configured backend: a PostgreSQL pool or the memory arena.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use dobby_core::config::{DatabaseBackend, DatabaseConfig};
use dobby_core::error::{AppError, ErrorKind};
use dobby_core::result::AppResult;

use crate::migration::run_migrations;
use crate::store::Stores;

/// Pool settings taken from `[database]`.
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}

/// Connect to PostgreSQL. Fails for any other configured backend.
pub async fn connect_pool(config: &DatabaseConfig) -> AppResult<PgPool> {
    if config.backend != DatabaseBackend::Postgres {
        return Err(AppError::configuration(
            "database.backend must be \"postgres\" to open a connection pool",
        ));
    }

    let masked = mask_password(&config.url);
    info!(url = %masked, max_connections = config.max_connections, "Connecting to PostgreSQL");

    let pool = pool_options(config)
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to connect to {masked}: {e}"),
                e,
            )
        })?;
    Ok(pool)
}

/// Store handles for the whole process, plus the pool when there is one.
#[derive(Debug)]
pub struct StoreConnection {
    stores: Stores,
    pool: Option<PgPool>,
}

impl StoreConnection {
    /// Open the configured backend, applying migrations first when
    /// `run_migrations` is set.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let pool = connect_pool(config).await?;
                if config.run_migrations {
                    info!("Running database migrations");
                    run_migrations(&pool).await?;
                }
                Ok(Self {
                    stores: Stores::postgres(pool.clone()),
                    pool: Some(pool),
                })
            }
            DatabaseBackend::Memory => {
                warn!("Using the in-memory store; data is lost on exit");
                Ok(Self {
                    stores: Stores::memory(),
                    pool: None,
                })
            }
        }
    }

    /// Store handles to inject into services.
    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Which backend the handles point at.
    pub fn backend(&self) -> DatabaseBackend {
        if self.pool.is_some() {
            DatabaseBackend::Postgres
        } else {
            DatabaseBackend::Memory
        }
    }

    /// Release the pool, if any.
    pub async fn close(self) {
        if let Some(pool) = self.pool {
            pool.close().await;
            info!("Database pool closed");
        }
    }
}

/// Hide the password of a connection URL, keeping the user and host.
pub fn mask_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((credentials, host)) => match credentials.split_once(':') {
            Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}
