//! CLI administration tool for recipebook.
//!
//! Provides commands for managing users and API tokens and for importing
//! reference data without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user
//! cargo run --bin admin -- user create --username chef
//!
//! # Create a new API token for a user
//! cargo run --bin admin -- token create --username chef
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Production API"
//!
//! # Import reference data
//! cargo run --bin admin -- import ingredients data/ingredients.csv
//! cargo run --bin admin -- import tags data/tags.csv
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for token commands): HMAC secret,
//!   must match the server's
//!
//! # Features
//!
//! - **User Management**: Create accounts for recipe authors
//! - **Token Management**: Create, list, and revoke API tokens
//! - **Data Import**: Load ingredients and tags from CSV files
//! - **Interactive Prompts**: User-friendly CLI with confirmation dialogs
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use recipebook::application::services::hash_token;
use recipebook::domain::entities::NewUser;
use recipebook::domain::repositories::{
    IngredientRepository, TagRepository, TokenRepository, UserRepository,
};
use recipebook::infrastructure::persistence::{
    PgIngredientRepository, PgTagRepository, PgTokenRepository, PgUserRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing recipebook.
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
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Import reference data from CSV files
    Import {
        #[command(subcommand)]
        action: ImportAction,
    },

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
        /// Unique login name
        #[arg(short, long)]
        username: Option<String>,

        /// E-mail address
        #[arg(short, long)]
        email: Option<String>,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Owning user's username
        #[arg(short, long)]
        username: Option<String>,

        /// Token name (e.g., "Production API", "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token by name
    Revoke {
        /// Token name to revoke
        name: String,
    },
}

/// Reference data import subcommands.
#[derive(Subcommand)]
enum ImportAction {
    /// Import ingredients from a `name,measurement_unit` CSV file
    Ingredients {
        /// Path to the CSV file
        path: PathBuf,
    },

    /// Import tags from a `name,slug` CSV file
    Tags {
        /// Path to the CSV file
        path: PathBuf,
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
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Import { action } => handle_import_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create { username, email } => {
            create_user(repo, username, email).await?;
        }
    }

    Ok(())
}

/// Creates a new user with interactive prompts for missing fields.
async fn create_user(
    repo: Arc<PgUserRepository>,
    username: Option<String>,
    email: Option<String>,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("E-mail").interact_text()?,
    };

    let first_name: String = Input::new()
        .with_prompt("First name")
        .allow_empty(true)
        .interact_text()?;

    let last_name: String = Input::new()
        .with_prompt("Last name")
        .allow_empty(true)
        .interact_text()?;

    let user = repo
        .create(NewUser {
            username,
            email,
            first_name,
            last_name,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:       {}", user.id.to_string().bright_white());
    println!("  Username: {}", user.username.cyan());
    println!();

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create { username, name, yes } => {
            let users = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
            create_token(repo, users, username, name, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name } => {
            revoke_token(repo, name).await?;
        }
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// # Flow
///
/// 1. Resolve the owning user (or prompt)
/// 2. Prompt for token name (or use provided)
/// 3. Generate a random token
/// 4. Display token details with warning
/// 5. Confirm creation (unless `--yes` flag)
/// 6. Hash token with HMAC-SHA256 and `TOKEN_SIGNING_SECRET`
/// 7. Store in database
/// 8. Display usage instructions
///
/// # Security
///
/// - Only the keyed hash is stored in the database
/// - Raw token is displayed once and cannot be retrieved later
/// - Tokens are 48 characters (alphanumeric) for high entropy
async fn create_token(
    repo: Arc<PgTokenRepository>,
    users: Arc<PgUserRepository>,
    username: Option<String>,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let signing_secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let user = users
        .find_by_username(&username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("User '{username}' not found"))?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Production API")
            .interact_text()?,
    };

    let token_value = generate_token();
    println!("{}", "✨ Generated new token".green());

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  User:  {}", user.username.cyan());
    println!("  Name:  {}", token_name.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
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

    let token_hash = hash_token(&signing_secret, &token_value);

    repo.create_token(user.id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token_value.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/users/subscriptions",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 API Tokens
///
///   ID  Name                           Created              Status
///   ───────────────────────────────────────────────────────────────
///   1   Production API                 2026-01-15 10:30     ACTIVE
///   2   Mobile App                     2026-01-16 14:20     REVOKED
/// ```
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
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
        "  {:<3} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
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
            "  {:<3} {:<30} {:<20} {}",
            token.id.to_string().bright_black(),
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

/// Revokes a token by name with confirmation prompt.
async fn revoke_token(repo: Arc<PgTokenRepository>, name: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    println!("  Token: {}", name.cyan());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let revoked = repo
        .revoke(&name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    if revoked {
        println!("{}", "✅ Token revoked successfully!".green().bold());
    } else {
        println!("{}", "⚠️  No active token with that name".yellow());
    }
    println!();

    Ok(())
}

/// Dispatches reference data imports.
async fn handle_import_action(action: ImportAction, pool: &PgPool) -> Result<()> {
    match action {
        ImportAction::Ingredients { path } => {
            let repo = PgIngredientRepository::new(Arc::new(pool.clone()));

            let rows = read_csv_pairs(&path)?;
            let total = rows.len();

            let inserted = repo
                .insert_many(rows)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to import ingredients: {}", e))?;

            println!(
                "{} {} of {} ingredients imported ({} already present)",
                "✅".green(),
                inserted.to_string().bright_white().bold(),
                total,
                total as u64 - inserted
            );
        }
        ImportAction::Tags { path } => {
            let repo = PgTagRepository::new(Arc::new(pool.clone()));

            let rows = read_csv_pairs(&path)?;
            let total = rows.len();

            let mut inserted = 0u64;
            for (name, slug) in rows {
                if repo
                    .insert(name, slug)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to import tags: {}", e))?
                {
                    inserted += 1;
                }
            }

            println!(
                "{} {} of {} tags imported ({} already present)",
                "✅".green(),
                inserted.to_string().bright_white().bold(),
                total,
                total as u64 - inserted
            );
        }
    }

    Ok(())
}

/// Reads a two-column CSV file into `(first, second)` pairs.
///
/// Fields may be double-quoted; a quoted field can carry commas and
/// escaped quotes (`""`). Blank lines are skipped.
fn read_csv_pairs(path: &PathBuf) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut pairs = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_csv_record(line)
            .with_context(|| format!("Malformed record on line {}: '{line}'", idx + 1))?;

        let mut fields = fields.into_iter();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(first), Some(second), None) => pairs.push((first, second)),
            _ => anyhow::bail!("Expected two columns on line {}: '{line}'", idx + 1),
        }
    }

    Ok(pairs)
}

/// Splits a single CSV record into fields. Unquoted fields are trimmed;
/// quoted fields keep their content verbatim, with `""` unescaped to `"`.
///
/// Returns `None` on an unterminated quote.
fn split_csv_record(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' if field.trim().is_empty() => {
                    field.clear();
                    quoted = true;
                    in_quotes = true;
                }
                ',' => {
                    let done = std::mem::take(&mut field);
                    fields.push(if quoted { done } else { done.trim().to_string() });
                    quoted = false;
                }
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return None;
    }

    fields.push(if quoted {
        field
    } else {
        field.trim().to_string()
    });
    Some(fields)
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

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a cryptographically random token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
/// - Entropy: ~286 bits
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
