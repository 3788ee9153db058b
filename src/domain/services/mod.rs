//! Domain services - Pure dice, check and derived-attribute logic

pub mod derived_attributes;
pub mod dice_notation;
pub mod dice_roller;
pub mod roll_format;
pub mod sheet_format;
pub mod skill_check;

#[cfg(test)]
pub mod testing;

pub use dice_roller::{evaluate_roll, roll_characteristics, roll_dice, roll_percentile, DiceSource};
pub use skill_check::{resolve_skill_check, resolve_with_difficulty};
