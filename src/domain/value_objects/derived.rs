//! Derived attribute pools computed once from characteristics at creation

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: i32,
    pub maximum: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sanity {
    pub current: i32,
    pub maximum: i32,
    pub starting: i32,
}

impl Sanity {
    /// Sanity at or below this value triggers indefinite insanity
    pub fn indefinite_insanity_threshold(&self) -> i32 {
        self.starting.div_euclid(5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Luck {
    pub current: i32,
    pub starting: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicPoints {
    pub current: i32,
    pub maximum: i32,
}

/// Damage bonus dice and build, both keyed on STR + SIZ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageBonus {
    /// `-2`, `0`, `+1d4`, `+3d6` ...
    pub damage_bonus: String,
    pub build: i32,
}

/// Everything an investigator sheet derives from its characteristics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAttributes {
    pub hit_points: HitPoints,
    pub sanity: Sanity,
    pub luck: Luck,
    pub magic_points: MagicPoints,
    pub movement_rate: u8,
    pub damage_bonus: String,
    pub build: i32,
}
