//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use dobby_core::config::AppConfig;
use dobby_core::error::AppError;
use dobby_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redact(super::load_config(config_path)?);
            output::print_item(&config, format);
        }
    }

    Ok(())
}

fn redact(mut config: AppConfig) -> AppConfig {
    const MASK: &str = "****";
    config.database.url = mask_password(&config.database.url);
    config.auth.jwt_secret = MASK.to_string();
    if !config.storage.s3.secret_key.is_empty() {
        config.storage.s3.secret_key = MASK.to_string();
    }
    config
}
