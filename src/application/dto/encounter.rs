use serde::{Deserialize, Serialize};

use crate::domain::entities::Encounter;

#[derive(Debug, Deserialize)]
pub struct CreateEncounterRequestDto {
    pub name: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub rewards: Option<String>,
    #[serde(default)]
    pub private_notes: Option<String>,
    pub created_by: String,
}

#[derive(Debug, Serialize)]
pub struct EncounterListDto {
    pub encounters: Vec<Encounter>,
}

/// A sprung encounter: `display` goes to the table, `keeper_display` to the Keeper
#[derive(Debug, Serialize)]
pub struct SpawnedEncounterDto {
    #[serde(flatten)]
    pub encounter: Encounter,
    pub display: String,
    pub keeper_display: String,
}
