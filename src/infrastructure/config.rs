//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Storage backend: "sqlite" or "memory"
    pub storage_backend: String,
    /// Path to the SQLite database file
    pub sqlite_path: String,

    /// HTTP server port
    pub server_port: u16,

    /// Fixed seed for reproducible dice, thread RNG when unset
    pub dice_seed: Option<u64>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            storage_backend: env::var("STORAGE_BACKEND").unwrap_or_else(|_| "sqlite".to_string()),
            sqlite_path: env::var("SQLITE_PATH")
                .unwrap_or_else(|_| "./data/keeper.db".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            dice_seed: env::var("DICE_SEED")
                .ok()
                .map(|seed| seed.parse::<u64>())
                .transpose()
                .context("DICE_SEED must be an unsigned 64-bit integer")?,
        })
    }

    /// In-memory storage and a fixed seed, for tests
    #[cfg(test)]
    pub fn for_tests(dice_seed: u64) -> Self {
        Self {
            storage_backend: "memory".to_string(),
            sqlite_path: String::new(),
            server_port: 0,
            dice_seed: Some(dice_seed),
        }
    }
}
