//! CLI administration tool for shorturl.
//!
//! Provides commands for managing user accounts, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values)
//! cargo run --bin admin -- user create --email ops@example.com
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Lock out / restore an account
//! cargo run --bin admin -- user deactivate ops@example.com
//! cargo run --bin admin -- user activate ops@example.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`)

use shorturl::config::Config;
use shorturl::domain::entities::NewUser;
use shorturl::domain::entities::user::normalize_email;
use shorturl::domain::repositories::{LinkRepository, UserRepository};
use shorturl::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use shorturl::infrastructure::security::password::hash_password;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// Shortest password accepted, matching the registration endpoint.
const MIN_PASSWORD_LENGTH: usize = 8;

/// CLI tool for managing shorturl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Allow a user to log in again
    Activate { email: String },

    /// Block a user; existing tokens stop working immediately
    Deactivate { email: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::Create {
            email,
            password,
            yes,
        } => create_user(&repo, email, password, yes).await?,
        UserAction::List => list_users(&repo).await?,
        UserAction::Activate { email } => set_active(&repo, &email, true).await?,
        UserAction::Deactivate { email } => set_active(&repo, &email, false).await?,
    }

    Ok(())
}

/// Creates a user with interactive prompts for anything not given as a flag.
///
/// The password is hashed with Argon2 before it reaches the database.
async fn create_user(
    repo: &PgUserRepository,
    email: Option<String>,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let email = normalize_email(&email);

    if !email.contains('@') {
        bail!("Invalid email address: {email}");
    }

    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        bail!("Password must be at least {MIN_PASSWORD_LENGTH} characters");
    }

    println!();
    println!("  Email: {}", email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let hashed_password =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    let user = repo
        .create(NewUser {
            email,
            hashed_password,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {e}"))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID: {}", user.id.to_string().bright_white());
    println!();
    println!("{}", "Get a token with:".bright_white());
    println!(
        "  curl -X POST http://localhost:3000/auth/token -H 'Content-Type: application/json' -d '{{\"email\":\"{}\",\"password\":\"...\"}}'",
        user.email
    );
    println!();

    Ok(())
}

/// Lists all users with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Email                          Created              Status
///   ───────────────────────────────────────────────────────────────────────────
///   1   ops@example.com                2026-01-15 10:30     ACTIVE
///   2   old@example.com                2026-01-16 14:20     INACTIVE
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {e}"))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        let status = if user.is_active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };

        println!(
            "  {:<3} {:<30} {:<20} {}",
            user.id.to_string().bright_black(),
            user.email.cyan(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Flips the activation flag of a user.
async fn set_active(repo: &PgUserRepository, email: &str, is_active: bool) -> Result<()> {
    let email = normalize_email(email);

    let updated = repo
        .set_active(&email, is_active)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {e}"))?;

    if !updated {
        bail!("User not found: {email}");
    }

    let state = if is_active { "activated" } else { "deactivated" };
    println!("{} {} {}", "✅".green(), email.cyan(), state.bold());

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Number of users (and how many are active)
/// - Number of links
/// - Total clicks across all links
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links = PgLinkRepository::new(Arc::new(pool.clone()));
    let links_count = links
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {e}"))?;

    let (users_count, active_users): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COUNT(*) FILTER (WHERE is_active) FROM users")
            .fetch_one(pool)
            .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM urls")
        .fetch_one(pool)
        .await?;

    println!(
        "  Users:   {} ({} active)",
        users_count.to_string().bright_green().bold(),
        active_users.to_string().bright_white()
    );
    println!(
        "  Links:   {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:  {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}
