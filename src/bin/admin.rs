//! CLI administration tool for the subdomain registrar.
//!
//! Issues sign-in tokens, inspects subdomain bindings and checks the
//! database without going through the interactive registrar.
//!
//! # Usage
//!
//! ```bash
//! # Issue a sign-in token for a user
//! cargo run --bin admin -- token create --user alice
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "alice laptop"
//!
//! # List bindings, optionally for one owner
//! cargo run --bin admin -- bindings --owner alice
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection
//! - `TOKEN_SIGNING_SECRET`: required by `token create`

use subdomain_registrar::application::services::AuthService;
use subdomain_registrar::config;
use subdomain_registrar::domain::repositories::{HostingRepository, TokenRepository};
use subdomain_registrar::infrastructure::persistence::{
    self, PgHostingRepository, PgTokenRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the subdomain registrar.
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
    /// Manage sign-in tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// List subdomain bindings
    Bindings {
        /// Only show bindings held by this user
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new sign-in token
    Create {
        /// User the token signs in as
        #[arg(short, long)]
        user: Option<String>,

        /// Token name (e.g., "alice laptop")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = persistence::connect(config.require_database_url()?, 2)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &pool, &config).await?,
        Commands::Bindings { owner } => list_bindings(&pool, owner).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(
    action: TokenAction,
    pool: &PgPool,
    config: &config::Config,
) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create { user, name, yes } => {
            let secret = config.require_signing_secret()?.to_string();
            create_token(AuthService::new(repo, secret), user, name, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name_or_id } => {
            revoke_token(repo, name_or_id).await?;
        }
    }

    Ok(())
}

/// Issues a token with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for user and token name (or use provided)
/// 2. Confirm creation (unless `--yes` flag)
/// 3. Generate, hash with HMAC-SHA256 and store
/// 4. Display the raw token once
async fn create_token(
    auth: AuthService<PgTokenRepository>,
    user: Option<String>,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Issue Sign-in Token".bright_blue().bold());
    println!();

    let username = match user {
        Some(u) => u,
        None => Input::new().with_prompt("User").interact_text()?,
    };

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text(format!("{username} terminal"))
            .interact_text()?,
    };

    println!("  User: {}", username.cyan());
    println!("  Name: {}", token_name.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let (record, raw) = auth
        .issue_token(&username, &token_name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!("  ID:    {}", record.id.to_string().bright_black());
    println!("  Token: {}", raw.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Sign in with:".bright_white());
    println!(
        "  subdomain-registrar register --token {}",
        raw.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Sign-in Tokens
///
///   ID  User         Name                      Created              Status
///   ──────────────────────────────────────────────────────────────────────
///   1   alice        alice terminal            2025-01-15 10:30     ACTIVE
///   2   bob          ci                        2025-01-16 14:20     REVOKED
/// ```
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 Sign-in Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<12} {:<25} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<12} {:<25} {:<20} {}",
            token.id.to_string().bright_black(),
            token.username.bright_white(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// Numeric input is looked up as an ID, anything else as an exact name.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke Sign-in Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_name(&name_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let token = token.context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  User:  {}", token.username.bright_white());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Lists subdomain bindings, newest first.
async fn list_bindings(pool: &PgPool, owner: Option<String>) -> Result<()> {
    println!("{}", "🌐 Subdomain Bindings".bright_blue().bold());
    println!();

    let repo = PgHostingRepository::new(Arc::new(pool.clone()));
    let records = match owner.as_deref() {
        Some(owner) => repo.list_by_owner(owner).await,
        None => repo.list().await,
    }
    .map_err(|e| anyhow::anyhow!("Failed to list bindings: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No bindings found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<24} {:<12} {:<20} {}",
        "Subdomain".bright_white().bold(),
        "Owner".bright_white().bold(),
        "Updated".bright_white().bold(),
        "Folder".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        println!(
            "  {:<24} {:<12} {:<20} {}",
            record.subdomain.cyan(),
            record.owner.bright_white(),
            record
                .updated_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            record.root_dir
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
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

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let bindings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subdomains")
                .fetch_one(pool)
                .await?;

            let tokens: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL:    {}", version.bright_white());
            println!(
                "  Bindings:      {}",
                bindings.to_string().bright_green().bold()
            );
            println!(
                "  Active tokens: {}",
                tokens.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
