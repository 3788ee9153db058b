//! Repository ports - Document storage for investigators, NPCs and encounters
//!
//! Records are read and written whole. There is no partial update and no
//! optimistic locking, so two concurrent writers to the same record race and
//! the last save wins.

use async_trait::async_trait;

use crate::domain::entities::{Encounter, Investigator, Npc};
use crate::domain::value_objects::{GuildId, UserId};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A record with the same key already exists
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// One investigator per user
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvestigatorRepositoryPort: Send + Sync {
    async fn get(&self, user_id: &UserId) -> Result<Option<Investigator>, RepositoryError>;

    /// Insert a new record. `Conflict` when the user already has one.
    async fn create(&self, investigator: &Investigator) -> Result<(), RepositoryError>;

    /// Replace the stored record
    async fn save(&self, investigator: &Investigator) -> Result<(), RepositoryError>;
}

/// NPCs keyed by guild and case-insensitive name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NpcRepositoryPort: Send + Sync {
    /// Insert a new NPC. `Conflict` when the guild already has one with that name.
    async fn create(&self, npc: &Npc) -> Result<(), RepositoryError>;

    async fn get_by_name(&self, guild_id: &GuildId, name: &str)
        -> Result<Option<Npc>, RepositoryError>;

    /// All NPCs in a guild, newest first
    async fn list(&self, guild_id: &GuildId) -> Result<Vec<Npc>, RepositoryError>;
}

/// Encounters keyed by guild and case-insensitive name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EncounterRepositoryPort: Send + Sync {
    /// Insert a new encounter. `Conflict` when the guild already has one with that name.
    async fn create(&self, encounter: &Encounter) -> Result<(), RepositoryError>;

    async fn get_by_name(
        &self,
        guild_id: &GuildId,
        name: &str,
    ) -> Result<Option<Encounter>, RepositoryError>;

    /// All encounters in a guild, newest first
    async fn list(&self, guild_id: &GuildId) -> Result<Vec<Encounter>, RepositoryError>;
}
