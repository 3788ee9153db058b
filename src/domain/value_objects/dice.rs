//! Dice roll value objects
//!
//! A `RollSpecification` is what a dice expression means. A `RollResult` is
//! what happened when it was thrown. `SkillCheckResult` classifies a single
//! percentile roll against a target into the d100 success tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Most dice a single expression may throw
pub const MAX_DICE: u32 = 100;

/// Errors raised while parsing or evaluating a dice expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// The expression could not be read as dice notation
    #[error("{0}")]
    Parse(String),
    /// The expression parsed but cannot be rolled as written
    #[error("{0}")]
    InvalidRoll(String),
}

/// Structured form of a dice expression such as `4d6 drop lowest` or `1d20+5 adv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollSpecification {
    pub count: u32,
    pub sides: u32,
    #[serde(default)]
    pub modifier: i64,
    #[serde(default)]
    pub drop_lowest: Option<u32>,
    #[serde(default)]
    pub drop_highest: Option<u32>,
    #[serde(default)]
    pub advantage: bool,
    #[serde(default)]
    pub disadvantage: bool,
}

impl RollSpecification {
    pub fn new(count: u32, sides: u32) -> Self {
        Self {
            count,
            sides,
            modifier: 0,
            drop_lowest: None,
            drop_highest: None,
            advantage: false,
            disadvantage: false,
        }
    }

    pub fn with_modifier(mut self, modifier: i64) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn with_drop_lowest(mut self, n: u32) -> Self {
        self.drop_lowest = Some(n);
        self
    }

    pub fn with_drop_highest(mut self, n: u32) -> Self {
        self.drop_highest = Some(n);
        self
    }

    pub fn with_advantage(mut self) -> Self {
        self.advantage = true;
        self
    }

    pub fn with_disadvantage(mut self) -> Self {
        self.disadvantage = true;
        self
    }

    pub fn is_d20(&self) -> bool {
        self.sides == 20
    }
}

impl fmt::Display for RollSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.modifier > 0 {
            write!(f, "+{}", self.modifier)?;
        } else if self.modifier < 0 {
            write!(f, "{}", self.modifier)?;
        }
        if self.advantage {
            write!(f, " advantage")?;
        }
        if self.disadvantage {
            write!(f, " disadvantage")?;
        }
        if let Some(n) = self.drop_lowest {
            write!(f, " drop lowest {}", n)?;
        }
        if let Some(n) = self.drop_highest {
            write!(f, " drop highest {}", n)?;
        }
        Ok(())
    }
}

/// Outcome of evaluating a roll specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Dice that count toward the total, after drops or advantage
    pub rolls: Vec<u32>,
    /// Every die thrown, in throw order
    pub raw_rolls: Vec<u32>,
    /// Sum of kept dice plus the modifier
    pub total: i64,
    pub modifier: i64,
    /// Expression as the caller wrote it
    pub expression: String,
    /// A kept d20 showed 20
    pub critical_success: bool,
    /// A kept d20 showed 1
    pub critical_failure: bool,
}

/// Success tier of a percentile check, from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessTier {
    Fumble,
    Failure,
    Success,
    HardSuccess,
    ExtremeSuccess,
}

impl SuccessTier {
    pub fn banner(&self) -> &'static str {
        match self {
            Self::ExtremeSuccess => "🌟 **EXTREME SUCCESS!** 🌟",
            Self::HardSuccess => "✨ **HARD SUCCESS!** ✨",
            Self::Success => "✅ **SUCCESS!**",
            Self::Fumble => "💀 **FUMBLE!** 💀",
            Self::Failure => "❌ **FAILURE**",
        }
    }
}

impl fmt::Display for SuccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fumble => "Fumble",
            Self::Failure => "Failure",
            Self::Success => "Success",
            Self::HardSuccess => "Hard Success",
            Self::ExtremeSuccess => "Extreme Success",
        };
        write!(f, "{}", name)
    }
}

/// A percentile roll classified against a target value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCheckResult {
    /// Percentile roll in 1..=100
    pub roll: u32,
    /// Target after difficulty, never clamped
    pub target: i32,
    pub success: bool,
    pub hard_success: bool,
    pub extreme_success: bool,
    pub fumble: bool,
}

impl SkillCheckResult {
    /// Classify `roll` against `target`. Each tier is computed independently.
    pub fn evaluate(roll: u32, target: i32) -> Self {
        let roll_value = i64::from(roll);
        let target_value = i64::from(target);
        let success = roll_value <= target_value;

        Self {
            roll,
            target,
            success,
            hard_success: roll_value <= target_value.div_euclid(2),
            extreme_success: roll_value <= target_value.div_euclid(5),
            fumble: roll >= 96 && !success,
        }
    }

    pub fn tier(&self) -> SuccessTier {
        if self.success {
            if self.extreme_success {
                SuccessTier::ExtremeSuccess
            } else if self.hard_success {
                SuccessTier::HardSuccess
            } else {
                SuccessTier::Success
            }
        } else if self.fumble {
            SuccessTier::Fumble
        } else {
            SuccessTier::Failure
        }
    }
}
