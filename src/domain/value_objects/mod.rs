//! Value objects - Immutable objects defined by their attributes

mod characteristics;
mod derived;
mod dice;
mod difficulty;
mod ids;
mod sanity_loss;

pub use characteristics::{Characteristic, CharacteristicMethod, Characteristics};
pub use derived::{DamageBonus, DerivedAttributes, HitPoints, Luck, MagicPoints, Sanity};
pub use dice::{DiceError, RollResult, RollSpecification, SkillCheckResult, MAX_DICE};
#[cfg(test)]
pub use dice::SuccessTier;
pub use difficulty::Difficulty;
pub use ids::*;
pub use sanity_loss::SanitySeverity;
