//! Bootstrap for the record layer.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Create the media upload folders
//! 5. Seed configured currencies

use bank_chat_records::{config, db, media, services::currency_service, store::PgStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let has_default_avatar = media::ensure_layout(&config.media_root).await?;
    tracing::info!(
        media_root = %config.media_root.display(),
        has_default_avatar,
        "Media folders ready"
    );

    let store = PgStore::new(pool);
    let added = currency_service::ensure_currencies(&store, &config.currencies).await?;
    tracing::info!(added = added.len(), "Currencies seeded");

    tracing::info!("Record store ready");
    Ok(())
}
