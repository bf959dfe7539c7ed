//! Dobby Drive server.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use dobby_api::AppState;
use dobby_core::config::AppConfig;
use dobby_core::error::AppError;
use dobby_database::StoreConnection;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = ?e, "Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("DOBBY_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Dobby Drive v{}", env!("CARGO_PKG_VERSION"));

    // Store handles
    let connection = StoreConnection::open(&config.database).await?;
    tracing::info!(backend = ?connection.backend(), "Stores ready");

    // Blob store
    tracing::info!(provider = ?config.storage.provider, "Initializing blob store...");
    let blobs = dobby_storage::build_blob_store(&config.storage).await?;

    // HTTP server
    let state = AppState::new(config, connection.stores(), blobs);
    let served = dobby_api::serve(state).await;

    connection.close().await;

    tracing::info!("Dobby Drive shut down gracefully");
    served
}
