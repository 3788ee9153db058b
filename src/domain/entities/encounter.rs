//! Encounter entity - A Keeper-prepared scene stored per guild

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::npc::name_key;
use crate::domain::value_objects::{EncounterId, GuildId, UserId};

/// A scene the Keeper writes ahead of time and springs on the table later.
///
/// Players only ever see the name and description. Location, requirements,
/// rewards and notes stay with the Keeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub id: EncounterId,
    pub guild_id: GuildId,
    pub name: String,
    pub location: String,
    /// What the players see and experience
    pub description: String,
    /// Skill checks the scene calls for
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub rewards: Option<String>,
    #[serde(default)]
    pub private_notes: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Encounter {
    pub fn new(
        guild_id: GuildId,
        name: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
        created_by: UserId,
    ) -> Self {
        Self {
            id: EncounterId::new(),
            guild_id,
            name: name.into(),
            location: location.into(),
            description: description.into(),
            requirements: None,
            rewards: None,
            private_notes: None,
            created_by,
            created_at: Utc::now(),
        }
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.requirements = Some(requirements.into());
        self
    }

    pub fn with_rewards(mut self, rewards: impl Into<String>) -> Self {
        self.rewards = Some(rewards.into());
        self
    }

    pub fn with_private_notes(mut self, notes: impl Into<String>) -> Self {
        self.private_notes = Some(notes.into());
        self
    }

    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_encounter_has_no_keeper_extras() {
        let encounter = Encounter::new(
            GuildId::new("g1"),
            "  The Silver Key ",
            "Arkham library basement",
            "Dust and the smell of old paper",
            UserId::new("keeper"),
        );
        assert_eq!(encounter.name_key(), "the silver key");
        assert!(encounter.requirements.is_none());
        assert!(encounter.rewards.is_none());
        assert!(encounter.private_notes.is_none());
    }

    #[test]
    fn test_optional_fields_default_when_missing() {
        let json = serde_json::json!({
            "id": EncounterId::new(),
            "guild_id": "g1",
            "name": "Night Watch",
            "location": "Miskatonic campus",
            "description": "Footsteps behind you",
            "created_by": "keeper",
            "created_at": "2026-10-19T20:00:00Z"
        });
        let encounter: Encounter = serde_json::from_value(json).unwrap();
        assert_eq!(encounter.name, "Night Watch");
        assert!(encounter.rewards.is_none());
    }
}
