//! The eight Call of Cthulhu characteristics

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Characteristic scores, conventionally 15..=90 when rolled as 3d6x5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristics {
    #[serde(rename = "STR")]
    pub strength: i32,
    #[serde(rename = "DEX")]
    pub dexterity: i32,
    #[serde(rename = "INT")]
    pub intelligence: i32,
    #[serde(rename = "CON")]
    pub constitution: i32,
    #[serde(rename = "APP")]
    pub appearance: i32,
    #[serde(rename = "POW")]
    pub power: i32,
    #[serde(rename = "SIZ")]
    pub size: i32,
    #[serde(rename = "EDU")]
    pub education: i32,
}

impl Characteristics {
    /// Every characteristic set to the same value
    pub fn uniform(value: i32) -> Self {
        Self {
            strength: value,
            dexterity: value,
            intelligence: value,
            constitution: value,
            appearance: value,
            power: value,
            size: value,
            education: value,
        }
    }

    /// Point-buy baseline: 50 everywhere, EDU 70
    pub fn point_buy() -> Self {
        Self {
            education: 70,
            ..Self::uniform(50)
        }
    }

    /// Manual entry baseline when nothing was supplied
    pub fn manual_default() -> Self {
        Self::uniform(50)
    }

    pub fn get(&self, characteristic: Characteristic) -> i32 {
        match characteristic {
            Characteristic::Strength => self.strength,
            Characteristic::Dexterity => self.dexterity,
            Characteristic::Intelligence => self.intelligence,
            Characteristic::Constitution => self.constitution,
            Characteristic::Appearance => self.appearance,
            Characteristic::Power => self.power,
            Characteristic::Size => self.size,
            Characteristic::Education => self.education,
        }
    }

    pub fn set(&mut self, characteristic: Characteristic, value: i32) {
        let slot = match characteristic {
            Characteristic::Strength => &mut self.strength,
            Characteristic::Dexterity => &mut self.dexterity,
            Characteristic::Intelligence => &mut self.intelligence,
            Characteristic::Constitution => &mut self.constitution,
            Characteristic::Appearance => &mut self.appearance,
            Characteristic::Power => &mut self.power,
            Characteristic::Size => &mut self.size,
            Characteristic::Education => &mut self.education,
        };
        *slot = value;
    }

    /// Characteristics paired with their scores, in sheet order
    pub fn iter(&self) -> impl Iterator<Item = (Characteristic, i32)> + '_ {
        Characteristic::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

/// One of the eight characteristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Characteristic {
    #[serde(rename = "STR")]
    Strength,
    #[serde(rename = "DEX")]
    Dexterity,
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "CON")]
    Constitution,
    #[serde(rename = "APP")]
    Appearance,
    #[serde(rename = "POW")]
    Power,
    #[serde(rename = "SIZ")]
    Size,
    #[serde(rename = "EDU")]
    Education,
}

impl Characteristic {
    pub const ALL: [Characteristic; 8] = [
        Self::Strength,
        Self::Dexterity,
        Self::Intelligence,
        Self::Constitution,
        Self::Appearance,
        Self::Power,
        Self::Size,
        Self::Education,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Intelligence => "INT",
            Self::Constitution => "CON",
            Self::Appearance => "APP",
            Self::Power => "POW",
            Self::Size => "SIZ",
            Self::Education => "EDU",
        }
    }

    /// Case-insensitive lookup by abbreviation (`str`, `Dex`, `EDU`)
    pub fn from_abbreviation(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL.into_iter().find(|c| c.abbreviation() == upper)
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// How a new investigator's characteristics are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacteristicMethod {
    /// 3d6x5 for each characteristic
    #[default]
    Roll,
    /// 50 everywhere, EDU 70
    #[serde(rename = "pointbuy")]
    PointBuy,
    /// Caller-supplied scores, 50 everywhere when absent
    Manual,
}

impl FromStr for CharacteristicMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "roll" => Ok(Self::Roll),
            "pointbuy" | "point_buy" | "point-buy" => Ok(Self::PointBuy),
            "manual" => Ok(Self::Manual),
            other => Err(format!("Unknown characteristic method: {}", other)),
        }
    }
}
