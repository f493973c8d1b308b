//! Application configuration management.
//!
//! Configuration is read from environment variables with the `envy` crate,
//! after an optional `.env` file has been loaded by `dotenvy`.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `MEDIA_ROOT` (optional): directory holding uploaded images, defaults to `media`
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `CURRENCIES` (optional): comma-separated codes seeded at startup, e.g. `USD,EUR`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_media_root")]
    pub media_root: PathBuf,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default)]
    pub currencies: Vec<String>,
}

fn default_media_root() -> PathBuf {
    PathBuf::from("media")
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value cannot be
    /// parsed into its expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        // Missing .env is fine
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }
}
