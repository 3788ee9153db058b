//! NPC entity - Keeper-controlled stat blocks stored per guild

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Weapon;
use crate::domain::services::derived_attributes::hit_points;
use crate::domain::value_objects::{Characteristic, Characteristics, GuildId, NpcId, UserId};

/// Stock NPC archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcTemplate {
    Cultist,
    Investigator,
    Monster,
    /// Random 3d6x5 characteristics and no skills
    Custom,
}

impl NpcTemplate {
    /// Fixed characteristics, or `None` for the rolled `Custom` template
    pub fn characteristics(&self) -> Option<Characteristics> {
        let [strength, dexterity, intelligence, constitution, appearance, power, size, education] =
            match self {
                Self::Cultist => [50, 60, 55, 60, 50, 70, 65, 40],
                Self::Investigator => [65, 70, 75, 65, 60, 60, 60, 80],
                Self::Monster => [85, 40, 30, 80, 10, 75, 90, 20],
                Self::Custom => return None,
            };
        Some(Characteristics {
            strength,
            dexterity,
            intelligence,
            constitution,
            appearance,
            power,
            size,
            education,
        })
    }

    pub fn skills(&self) -> BTreeMap<String, i32> {
        let table: &[(&str, i32)] = match self {
            Self::Cultist => &[
                ("spot hidden", 45),
                ("listen", 50),
                ("psychology", 35),
                ("occult", 60),
                ("dodge", 30),
                ("firearms (handgun)", 40),
                ("fighting (brawl)", 50),
            ],
            Self::Investigator => &[
                ("spot hidden", 70),
                ("listen", 65),
                ("psychology", 60),
                ("library use", 75),
                ("history", 60),
                ("dodge", 35),
                ("firearms (handgun)", 50),
                ("fighting (brawl)", 60),
            ],
            Self::Monster => &[
                ("spot hidden", 60),
                ("listen", 70),
                ("dodge", 20),
                ("fighting (brawl)", 70),
            ],
            Self::Custom => &[],
        };
        table.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    pub fn weapons(&self) -> Vec<Weapon> {
        match self {
            Self::Cultist => vec![
                Weapon::new("Knife", "fighting (brawl)", "1d4+db"),
                Weapon::new("Revolver", "firearms (handgun)", "1d10"),
            ],
            Self::Investigator => vec![
                Weapon::new("Pistol", "firearms (handgun)", "1d10"),
                Weapon::new("Fist", "fighting (brawl)", "1d3+db"),
            ],
            Self::Monster => vec![
                Weapon::new("Claws", "fighting (brawl)", "1d6+db"),
                Weapon::new("Bite", "fighting (brawl)", "1d8+db"),
            ],
            Self::Custom => Vec::new(),
        }
    }
}

impl fmt::Display for NpcTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cultist => "cultist",
            Self::Investigator => "investigator",
            Self::Monster => "monster",
            Self::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for NpcTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cultist" => Ok(Self::Cultist),
            "investigator" => Ok(Self::Investigator),
            "monster" => Ok(Self::Monster),
            "custom" => Ok(Self::Custom),
            other => Err(format!("Unknown NPC template: {}", other)),
        }
    }
}

/// What an NPC roll was made against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NpcRollTarget {
    Characteristic(Characteristic, i32),
    Skill(String, i32),
}

impl NpcRollTarget {
    pub fn label(&self) -> String {
        match self {
            Self::Characteristic(c, _) => c.abbreviation().to_string(),
            Self::Skill(name, _) => name.clone(),
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            Self::Characteristic(_, v) | Self::Skill(_, v) => *v,
        }
    }
}

/// A Keeper-controlled character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    pub guild_id: GuildId,
    pub name: String,
    pub characteristics: Characteristics,
    pub hit_points: i32,
    pub sanity: i32,
    pub skills: BTreeMap<String, i32>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub description: Option<String>,
    /// Only shown to the Keeper
    #[serde(default)]
    pub private_notes: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Npc {
    /// Hit points and sanity are derived from CON, SIZ and POW
    pub fn new(
        guild_id: GuildId,
        name: impl Into<String>,
        characteristics: Characteristics,
        created_by: UserId,
    ) -> Self {
        let hit_points = hit_points(characteristics.constitution, characteristics.size).maximum;
        Self {
            id: NpcId::new(),
            guild_id,
            name: name.into(),
            characteristics,
            hit_points,
            sanity: characteristics.power,
            skills: BTreeMap::new(),
            weapons: Vec::new(),
            description: None,
            private_notes: None,
            created_by,
            created_at: Utc::now(),
        }
    }

    pub fn with_skills(mut self, skills: BTreeMap<String, i32>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_weapons(mut self, weapons: Vec<Weapon>) -> Self {
        self.weapons = weapons;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_private_notes(mut self, notes: impl Into<String>) -> Self {
        self.private_notes = Some(notes.into());
        self
    }

    /// Key used for case-insensitive name lookups within a guild
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }

    /// Characteristic abbreviation first, then an exact skill name, both case-insensitive
    pub fn find_target(&self, query: &str) -> Option<NpcRollTarget> {
        if let Some(characteristic) = Characteristic::from_abbreviation(query) {
            return Some(NpcRollTarget::Characteristic(
                characteristic,
                self.characteristics.get(characteristic),
            ));
        }
        let query = query.trim().to_lowercase();
        self.skills
            .iter()
            .find(|(name, _)| name.to_lowercase() == query)
            .map(|(name, value)| NpcRollTarget::Skill(name.clone(), *value))
    }
}

pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
