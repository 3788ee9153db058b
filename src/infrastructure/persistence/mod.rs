//! Persistence adapters
//!
//! In-memory and SQLite implementations of the repository ports, selected at
//! startup by `RepositoryFactory`.

mod memory_repository;
mod sqlite_repository;

pub use memory_repository::{
    InMemoryEncounterRepository, InMemoryInvestigatorRepository, InMemoryNpcRepository,
};
pub use sqlite_repository::{
    SqliteEncounterRepository, SqliteInvestigatorRepository, SqliteNpcRepository,
};

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::application::ports::outbound::{
    EncounterRepositoryPort, InvestigatorRepositoryPort, NpcRepositoryPort,
};
use crate::infrastructure::config::AppConfig;

/// Repository set for the configured backend
pub struct Repositories {
    pub investigators: Arc<dyn InvestigatorRepositoryPort>,
    pub npcs: Arc<dyn NpcRepositoryPort>,
    pub encounters: Arc<dyn EncounterRepositoryPort>,
}

/// Creates repositories for the backend named in configuration
pub struct RepositoryFactory;

impl RepositoryFactory {
    pub async fn create(config: &AppConfig) -> Result<Repositories> {
        match config.storage_backend.as_str() {
            "memory" => {
                tracing::info!("Using in-memory storage");
                Ok(Repositories {
                    investigators: Arc::new(InMemoryInvestigatorRepository::new()),
                    npcs: Arc::new(InMemoryNpcRepository::new()),
                    encounters: Arc::new(InMemoryEncounterRepository::new()),
                })
            }
            "sqlite" => {
                // Ensure data directory exists
                if let Some(parent) = std::path::Path::new(&config.sqlite_path).parent() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create database directory")?;
                }

                let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", config.sqlite_path))
                    .await
                    .context("Failed to connect to SQLite database")?;
                tracing::info!("Connected to SQLite database: {}", config.sqlite_path);

                let investigators = SqliteInvestigatorRepository::new(pool.clone())
                    .await
                    .context("Failed to initialize investigators table")?;
                let npcs = SqliteNpcRepository::new(pool.clone())
                    .await
                    .context("Failed to initialize npcs table")?;
                let encounters = SqliteEncounterRepository::new(pool)
                    .await
                    .context("Failed to initialize encounters table")?;

                Ok(Repositories {
                    investigators: Arc::new(investigators),
                    npcs: Arc::new(npcs),
                    encounters: Arc::new(encounters),
                })
            }
            backend => anyhow::bail!("Unsupported storage backend: {}", backend),
        }
    }
}
