//! Encounter Service - Scenes the Keeper prepares and later reveals

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{EncounterRepositoryPort, RepositoryError};
use crate::domain::entities::Encounter;
use crate::domain::value_objects::{GuildId, UserId};

#[derive(Debug, thiserror::Error)]
pub enum EncounterError {
    #[error("An encounter named \"{0}\" already exists")]
    AlreadyExists(String),
    #[error("No encounter named \"{0}\" found")]
    NotFound(String),
    #[error("Invalid encounter: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone)]
pub struct CreateEncounterRequest {
    pub guild_id: GuildId,
    pub name: String,
    pub location: String,
    pub description: String,
    pub requirements: Option<String>,
    pub rewards: Option<String>,
    pub private_notes: Option<String>,
    pub created_by: UserId,
}

/// Confirmation shown to the Keeper after saving
pub fn created_view(encounter: &Encounter) -> String {
    let mut output = format!(
        "✅ **Encounter Created: {}**\n📍 **Location:** {}\n📖 **Description:** {}",
        encounter.name, encounter.location, encounter.description
    );
    if let Some(requirements) = &encounter.requirements {
        output.push_str(&format!("\n🎲 **Requirements/Skill Checks:** {}", requirements));
    }
    output
}

/// What the players see when the encounter is sprung
pub fn public_view(encounter: &Encounter) -> String {
    format!("🎭 **{}**\n{}", encounter.name, encounter.description)
}

pub fn keeper_view(encounter: &Encounter) -> String {
    let mut output = format!(
        "🔒 **Keeper Notes - {}**\n📍 **Location:** {}",
        encounter.name, encounter.location
    );
    if let Some(requirements) = &encounter.requirements {
        output.push_str(&format!("\n🎲 **Requirements/Skill Checks:** {}", requirements));
    }
    if let Some(notes) = &encounter.private_notes {
        output.push_str(&format!("\n**Private Notes:** {}", notes));
    }
    if let Some(rewards) = &encounter.rewards {
        output.push_str(&format!("\n**Rewards:** {}", rewards));
    }
    output
}

pub fn list_view(encounters: &[Encounter]) -> String {
    if encounters.is_empty() {
        return "📝 No custom encounters found.".to_string();
    }
    let entries: Vec<String> = encounters
        .iter()
        .enumerate()
        .map(|(i, e)| format!("**{}.** {}\n*Location: {}*", i + 1, e.name, e.location))
        .collect();
    format!(
        "📋 **Custom Encounters**\nFound {} custom encounter(s):\n\n{}",
        encounters.len(),
        entries.join("\n\n")
    )
}

/// Trimmed text, or `None` when blank
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
pub trait EncounterService: Send + Sync {
    async fn create_encounter(
        &self,
        request: CreateEncounterRequest,
    ) -> Result<Encounter, EncounterError>;

    /// Encounters in a guild, newest first
    async fn list_encounters(&self, guild_id: &GuildId) -> Result<Vec<Encounter>, EncounterError>;

    /// Look up an encounter for the Keeper to reveal
    async fn spawn_encounter(
        &self,
        guild_id: &GuildId,
        name: &str,
    ) -> Result<Encounter, EncounterError>;
}

pub struct EncounterServiceImpl {
    repository: Arc<dyn EncounterRepositoryPort>,
}

impl EncounterServiceImpl {
    pub fn new(repository: Arc<dyn EncounterRepositoryPort>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EncounterService for EncounterServiceImpl {
    #[instrument(skip(self, request), fields(guild_id = %request.guild_id, name = %request.name))]
    async fn create_encounter(
        &self,
        request: CreateEncounterRequest,
    ) -> Result<Encounter, EncounterError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(EncounterError::InvalidInput(
                "Encounter name cannot be empty".to_string(),
            ));
        }
        let location = non_blank(Some(request.location.as_str()))
            .ok_or_else(|| EncounterError::InvalidInput("Location is required".to_string()))?;
        let description = non_blank(Some(request.description.as_str()))
            .ok_or_else(|| EncounterError::InvalidInput("Description is required".to_string()))?;

        let mut encounter = Encounter::new(
            request.guild_id.clone(),
            name,
            location,
            description,
            request.created_by.clone(),
        );
        if let Some(requirements) = non_blank(request.requirements.as_deref()) {
            encounter = encounter.with_requirements(requirements);
        }
        if let Some(rewards) = non_blank(request.rewards.as_deref()) {
            encounter = encounter.with_rewards(rewards);
        }
        if let Some(notes) = non_blank(request.private_notes.as_deref()) {
            encounter = encounter.with_private_notes(notes);
        }

        match self.repository.create(&encounter).await {
            Ok(()) => {}
            Err(RepositoryError::Conflict(_)) => {
                return Err(EncounterError::AlreadyExists(encounter.name))
            }
            Err(e) => return Err(e.into()),
        }

        info!(encounter_id = %encounter.id, "Created encounter: {}", encounter.name);
        Ok(encounter)
    }

    #[instrument(skip(self), fields(guild_id = %guild_id))]
    async fn list_encounters(&self, guild_id: &GuildId) -> Result<Vec<Encounter>, EncounterError> {
        debug!("Listing encounters");
        Ok(self.repository.list(guild_id).await?)
    }

    #[instrument(skip(self), fields(guild_id = %guild_id))]
    async fn spawn_encounter(
        &self,
        guild_id: &GuildId,
        name: &str,
    ) -> Result<Encounter, EncounterError> {
        let encounter = self
            .repository
            .get_by_name(guild_id, name)
            .await?
            .ok_or_else(|| EncounterError::NotFound(name.to_string()))?;

        info!(encounter_id = %encounter.id, "Spawned encounter: {}", encounter.name);
        Ok(encounter)
    }
}
