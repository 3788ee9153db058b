//! Investigator entity - A player's Call of Cthulhu character sheet
//!
//! One investigator per user. Derived attributes are computed from the
//! characteristics once, in [`Investigator::new`], and afterwards only their
//! current values move.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::derived_attributes::compute_derived_attributes;
use crate::domain::value_objects::{
    Characteristics, HitPoints, Luck, MagicPoints, Sanity, UserId,
};

/// Base values for the standard skill list. Dodge and own language are seeded
/// from DEX and EDU instead.
const BASE_SKILLS: &[(&str, i32)] = &[
    ("accounting", 5),
    ("anthropology", 1),
    ("appraise", 5),
    ("archaeology", 1),
    ("art/craft", 5),
    ("charm", 15),
    ("climb", 20),
    ("credit rating", 0),
    ("cthulhu mythos", 0),
    ("disguise", 5),
    ("drive auto", 20),
    ("electrical repair", 10),
    ("fast talk", 5),
    ("fighting (brawl)", 25),
    ("firearms (handgun)", 20),
    ("firearms (rifle/shotgun)", 25),
    ("first aid", 30),
    ("history", 5),
    ("intimidate", 15),
    ("jump", 20),
    ("law", 5),
    ("library use", 20),
    ("listen", 20),
    ("locksmith", 1),
    ("mechanical repair", 10),
    ("medicine", 1),
    ("natural world", 10),
    ("navigate", 10),
    ("occult", 5),
    ("operate heavy machinery", 1),
    ("persuade", 10),
    ("pilot", 1),
    ("psychology", 10),
    ("psychoanalysis", 1),
    ("ride", 5),
    ("science", 1),
    ("sleight of hand", 10),
    ("spot hidden", 25),
    ("stealth", 20),
    ("survival", 10),
    ("swim", 20),
    ("throw", 20),
    ("track", 10),
];

/// Language every new investigator speaks at EDU
pub const DEFAULT_LANGUAGE: &str = "English";

/// Starting skill table for the given characteristics
pub fn default_skills(characteristics: &Characteristics) -> BTreeMap<String, i32> {
    let mut skills: BTreeMap<String, i32> = BASE_SKILLS
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect();
    skills.insert("dodge".to_string(), characteristics.dexterity.div_euclid(2));
    skills.insert("language (own)".to_string(), characteristics.education);
    skills
}

/// Look up a skill by name.
///
/// Exact lowercase match first. Otherwise the first key, in table order, that
/// contains the query, is contained by it, or equals it once spaces are gone.
pub fn find_skill<'a>(skills: &'a BTreeMap<String, i32>, query: &str) -> Option<(&'a str, i32)> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    if let Some((name, value)) = skills.get_key_value(&query) {
        return Some((name.as_str(), *value));
    }

    let squashed: String = query.split_whitespace().collect();
    skills
        .iter()
        .find(|(key, _)| {
            key.contains(query.as_str())
                || query.contains(key.as_str())
                || key.split_whitespace().collect::<String>() == squashed
        })
        .map(|(name, value)| (name.as_str(), *value))
}

/// Free-text backstory sections of the sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backstory {
    pub personal_description: String,
    pub ideology_beliefs: String,
    pub significant_people: String,
    pub meaningful_locations: String,
    pub treasured_possessions: String,
    pub traits: String,
    pub encounters_with_unknown: String,
}

/// A weapon line on a sheet or stat block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Skill used to attack with it
    pub skill: String,
    /// Damage formula, e.g. `1d6+db`
    pub damage: String,
    #[serde(default)]
    pub range: String,
    #[serde(default = "one")]
    pub attacks_per_round: u32,
    #[serde(default)]
    pub ammo: u32,
    #[serde(default)]
    pub malfunction: u32,
}

fn one() -> u32 {
    1
}

impl Weapon {
    pub fn new(name: impl Into<String>, skill: impl Into<String>, damage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skill: skill.into(),
            damage: damage.into(),
            range: String::new(),
            attacks_per_round: 1,
            ammo: 0,
            malfunction: 0,
        }
    }
}

/// A player's investigator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investigator {
    pub user_id: UserId,
    pub name: String,
    pub occupation: String,
    pub age: u32,
    pub characteristics: Characteristics,

    // Derived attributes, fixed at creation
    pub hit_points: HitPoints,
    pub sanity: Sanity,
    pub luck: Luck,
    pub magic_points: MagicPoints,
    pub movement_rate: u8,
    pub damage_bonus: String,
    pub build: i32,

    pub backstory: Backstory,
    /// Lowercase skill name to percentage
    pub skills: BTreeMap<String, i32>,
    pub languages: BTreeMap<String, i32>,
    pub weapons: Vec<Weapon>,
    pub equipment: Vec<String>,
    pub armor: String,

    // Status tracking
    pub conditions: Vec<String>,
    pub injuries: Vec<String>,
    pub phobias: Vec<String>,
    pub manias: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Investigator {
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        occupation: impl Into<String>,
        age: u32,
        characteristics: Characteristics,
    ) -> Self {
        let derived = compute_derived_attributes(&characteristics);
        let mut languages = BTreeMap::new();
        languages.insert(DEFAULT_LANGUAGE.to_string(), characteristics.education);
        let now = Utc::now();

        Self {
            user_id,
            name: name.into(),
            occupation: occupation.into(),
            age,
            characteristics,
            hit_points: derived.hit_points,
            sanity: derived.sanity,
            luck: derived.luck,
            magic_points: derived.magic_points,
            movement_rate: derived.movement_rate,
            damage_bonus: derived.damage_bonus,
            build: derived.build,
            backstory: Backstory::default(),
            skills: default_skills(&characteristics),
            languages,
            weapons: Vec::new(),
            equipment: Vec::new(),
            armor: String::new(),
            conditions: Vec::new(),
            injuries: Vec::new(),
            phobias: Vec::new(),
            manias: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn find_skill(&self, query: &str) -> Option<(&str, i32)> {
        find_skill(&self.skills, query)
    }

    /// Set a skill under its lowercase name. Values are stored as given.
    pub fn set_skill(&mut self, name: &str, value: i32) {
        self.skills.insert(name.trim().to_lowercase(), value);
        self.touch();
    }

    /// Set current sanity, floored at zero
    pub fn set_sanity(&mut self, current: i32) {
        self.sanity.current = current.max(0);
        self.touch();
    }

    /// Set current luck, floored at zero
    pub fn set_luck(&mut self, current: i32) {
        self.luck.current = current.max(0);
        self.touch();
    }

    /// Returns false when the condition was already present
    pub fn add_condition(&mut self, condition: &str) -> bool {
        if self.conditions.iter().any(|c| c == condition) {
            return false;
        }
        self.conditions.push(condition.to_string());
        self.touch();
        true
    }

    /// Returns false when there was nothing to remove
    pub fn remove_condition(&mut self, condition: &str) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| c != condition);
        if self.conditions.len() == before {
            return false;
        }
        self.touch();
        true
    }

    pub fn set_backstory(&mut self, backstory: Backstory) {
        self.backstory = backstory;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
