//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application identity reported on the root and health endpoints
    pub app_name: String,
    pub app_version: String,

    /// Enables verbose statement logging in the storage layer
    pub debug: bool,

    /// Database connection URL (SQLite)
    pub database_url: String,

    /// The single browser origin allowed to call the API
    pub frontend_url: String,

    /// Runtime configuration
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            app_name: env::var("APP_NAME").map_err(|_| anyhow::anyhow!("APP_NAME is required"))?,
            app_version: env::var("APP_VERSION").unwrap_or_else(|_| "0.1.0".to_string()),

            debug: env::var("DEBUG")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),

            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            frontend_url: env::var("FRONTEND_URL")
                .map_err(|_| anyhow::anyhow!("FRONTEND_URL is required"))?,

            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
        };

        Ok(config)
    }
}
