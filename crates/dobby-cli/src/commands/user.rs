//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use dobby_auth::PasswordHasher;
use dobby_core::error::AppError;
use dobby_database::Stores;
use dobby_entity::user::User;
use dobby_service::user::{SeedOutcome, UserService};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user unless the email is already registered
    Seed {
        /// Email address
        #[arg(long, default_value = "test@dobbyads.com")]
        email: String,
        /// Password
        #[arg(long, default_value = "Passw0rd!")]
        password: String,
        /// Display name
        #[arg(long, default_value = "Test User")]
        name: String,
    },
    /// List all users
    List,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let stores = Stores::postgres(pool.clone());
    let service = UserService::new(stores.users, Arc::new(PasswordHasher::new()));

    let result = run(&service, &args.command, format).await;
    pool.close().await;
    result
}

async fn run(
    service: &UserService,
    command: &UserCommand,
    format: OutputFormat,
) -> Result<(), AppError> {
    match command {
        UserCommand::Seed {
            email,
            password,
            name,
        } => match service.seed_user(name, email, password).await? {
            SeedOutcome::Created(user) => {
                output::print_success(&format!("Created user '{}'", user.email));
                output::print_kv("id", &user.id.to_string());
            }
            SeedOutcome::Existing(user) => {
                output::print_warning(&format!("User '{}' already exists", user.email));
                output::print_kv("id", &user.id.to_string());
            }
        },
        UserCommand::List => {
            let users = service.list_users().await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
