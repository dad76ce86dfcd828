use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::Executor;

use crate::database::models::admin::ROLE_ADMIN;
use crate::database::DatabaseManager;
use crate::services::AdminService;

const SCHEMA_SQL: &str = include_str!("../database/schema.sql");

#[derive(Parser)]
#[command(name = "yanora")]
#[command(about = "Yanora CLI - operator tooling for the clinic API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply the database schema (idempotent)")]
    Init,

    #[command(about = "Create or update an admin account")]
    CreateAdmin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long, default_value = ROLE_ADMIN, help = "admin or super_admin")]
        role: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Init => init().await,
        Commands::CreateAdmin {
            email,
            password,
            role,
        } => create_admin(&email, &password, &role).await,
    }
}

async fn init() -> anyhow::Result<()> {
    println!("Initializing database...");

    let pool = DatabaseManager::pool()
        .await
        .context("failed to connect to database")?;

    pool.execute(SCHEMA_SQL)
        .await
        .context("failed to apply schema")?;

    println!("Database initialized");
    Ok(())
}

async fn create_admin(email: &str, password: &str, role: &str) -> anyhow::Result<()> {
    if !crate::auth::is_valid_role(role) {
        anyhow::bail!("role must be admin or super_admin");
    }

    let service = AdminService::new()
        .await
        .context("failed to connect to database")?;

    let admin = service
        .bootstrap_admin(email, password, role)
        .await
        .context("failed to create admin")?;

    println!("Admin ready:");
    println!("  email: {}", admin.email);
    println!("  role:  {}", admin.role);
    println!("\nThese credentials can now sign in at /admin/login.");
    Ok(())
}
