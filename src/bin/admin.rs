//! CLI administration tool for favorites-service.
//!
//! Provides commands for inspecting and clearing a user's favorites and for
//! evicting cached entries without going through the HTTP API. All favorites
//! commands go through [`FavoriteService`], so the same cache invalidation
//! applies as for API requests.
//!
//! # Usage
//!
//! ```bash
//! # List a user's favorites
//! cargo run --bin admin -- favorites list u1
//!
//! # Count a user's favorites
//! cargo run --bin admin -- favorites count u1
//!
//! # Remove all favorites of a user
//! cargo run --bin admin -- favorites clear u1
//!
//! # Drop a user's cached entries
//! cargo run --bin admin -- cache evict u1
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `config`); a PostgreSQL database is required.

use favorites_service::application::services::FavoriteService;
use favorites_service::config::{self, Config};
use favorites_service::domain::repositories::FavoriteRepository;
use favorites_service::infrastructure::cache::{
    CacheService, FavoritesCache, NullCache, RedisCache,
};
use favorites_service::infrastructure::persistence::PgFavoriteRepository;
use favorites_service::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing favorites-service.
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
    /// Inspect or clear a user's favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List a user's favorites, newest first
    List { user_id: String },

    /// Count a user's favorites
    Count { user_id: String },

    /// Remove all favorites of a user
    Clear {
        user_id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Drop every cached entry of a user
    Evict { user_id: String },
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

    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL (or DB_* variables) must be set")?;

    let pool = connect_pool(&config, &database_url).await?;

    match cli.command {
        Commands::Favorites { action } => {
            let service = build_service(&config, &pool).await;
            handle_favorites_action(action, &service).await?
        }
        Commands::Cache { action } => {
            let service = build_service(&config, &pool).await;
            handle_cache_action(action, &service).await
        }
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Builds the same service the server uses, over the given pool.
async fn build_service(config: &Config, pool: &PgPool) -> FavoriteService<dyn FavoriteRepository> {
    let repository: Arc<dyn FavoriteRepository> =
        Arc::new(PgFavoriteRepository::new(Arc::new(pool.clone())));

    let store: Arc<dyn CacheService> = match &config.redis_url {
        Some(url) => match RedisCache::connect(url).await {
            Ok(redis) => Arc::new(redis),
            Err(e) => {
                println!(
                    "{}",
                    format!("⚠️  Redis unavailable ({}), cache will not be touched", e).yellow()
                );
                Arc::new(NullCache::new())
            }
        },
        None => Arc::new(NullCache::new()),
    };

    FavoriteService::new(
        repository,
        FavoritesCache::new(store, config.cache_settings()),
    )
}

/// Dispatches favorites commands.
async fn handle_favorites_action(
    action: FavoritesAction,
    service: &FavoriteService<dyn FavoriteRepository>,
) -> Result<()> {
    match action {
        FavoritesAction::List { user_id } => list_favorites(service, &user_id).await,
        FavoritesAction::Count { user_id } => {
            let count = service
                .count_favorites(&user_id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count favorites: {}", e))?;

            println!(
                "  {}: {}",
                user_id.cyan(),
                count.to_string().bright_green().bold()
            );
            Ok(())
        }
        FavoritesAction::Clear { user_id, yes } => clear_favorites(service, &user_id, yes).await,
    }
}

/// Lists a user's favorites.
///
/// # Output Format
///
/// ```text
/// ⭐ Favorites of u1
///
///   ID   Product              Name                      Price      Added
///   ─────────────────────────────────────────────────────────────────────────────
///   2    p2                   Charger                   19.90      2025-03-01 10:30
///   1    p1                   Case                      9.99       2025-02-28 14:20
/// ```
async fn list_favorites(service: &FavoriteService<dyn FavoriteRepository>, user_id: &str) -> Result<()> {
    println!("{}", format!("⭐ Favorites of {}", user_id).bright_blue().bold());
    println!();

    let view = service
        .get_user_favorites(user_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load favorites: {}", e))?;

    if view.is_empty() {
        println!("{}", "  No favorites found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<20} {:<25} {:<10} {:<16}",
        "ID".bright_white().bold(),
        "Product".bright_white().bold(),
        "Name".bright_white().bold(),
        "Price".bright_white().bold(),
        "Added".bright_white().bold()
    );
    println!("  {}", "─".repeat(77).bright_black());

    for entry in &view.favorites {
        let price = entry
            .product_price
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<4} {:<20} {:<25} {:<10} {}",
            entry.favorite_id.to_string().bright_black(),
            entry.product_id.cyan(),
            entry.product_name.as_deref().unwrap_or("-"),
            price,
            entry
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        view.total_count.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Removes all favorites of a user after confirmation.
async fn clear_favorites(
    service: &FavoriteService<dyn FavoriteRepository>,
    user_id: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Clear favorites".bright_blue().bold());
    println!();

    let count = service
        .count_favorites(user_id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    if count == 0 {
        println!("{}", "⚠️  This user has no favorites".yellow());
        return Ok(());
    }

    println!("  User:      {}", user_id.cyan());
    println!("  Favorites: {}", count.to_string().bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove all of them?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .remove_all_favorites(user_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to clear favorites: {}", e))?;

    println!();
    println!(
        "{}",
        format!("✅ Removed {} favorites", deleted).green().bold()
    );
    println!();

    Ok(())
}

async fn handle_cache_action(action: CacheAction, service: &FavoriteService<dyn FavoriteRepository>) {
    match action {
        CacheAction::Evict { user_id } => {
            match service.evict_user(&user_id).await {
                Some(removed) => println!(
                    "{}",
                    format!("✅ Cache of {} evicted ({} keys swept)", user_id, removed)
                        .green()
                        .bold()
                ),
                None => println!(
                    "{}",
                    format!(
                        "⚠️  Cache sweep for {} did not complete; \
                         some entries may persist until their TTL",
                        user_id
                    )
                    .yellow()
                ),
            }
        }
    }
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

            let favorites: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites")
                .fetch_one(pool)
                .await?;

            let users: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT user_id) FROM favorites")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Favorites:  {}", favorites.to_string().bright_green().bold());
            println!("  Users:      {}", users.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
