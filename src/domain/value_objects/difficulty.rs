//! Check difficulty applied to a base skill or characteristic value

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Highest target a bonus die can raise a check to
pub const BONUS_TARGET_CAP: i32 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    /// Half the base value
    Hard,
    /// A fifth of the base value
    Extreme,
    /// Base + 20, capped at 95
    Bonus,
}

impl Difficulty {
    /// Target to roll under for a given base value
    pub fn apply(&self, base: i32) -> i32 {
        match self {
            Self::Normal => base,
            Self::Hard => base.div_euclid(2),
            Self::Extreme => base.div_euclid(5),
            Self::Bonus => base.saturating_add(20).min(BONUS_TARGET_CAP),
        }
    }

    /// Suffix shown after the skill name, empty for normal checks
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Hard => " (Hard)",
            Self::Extreme => " (Extreme)",
            Self::Bonus => " (Bonus)",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
            Self::Bonus => "bonus",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            "extreme" => Ok(Self::Extreme),
            "bonus" => Ok(Self::Bonus),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}
