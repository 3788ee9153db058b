//! Percentile skill resolution

use crate::domain::services::dice_roller::{roll_percentile, DiceSource};
use crate::domain::value_objects::{Difficulty, SkillCheckResult};

/// Roll d100 against an already adjusted target
pub fn resolve_skill_check(target: i32, source: &dyn DiceSource) -> SkillCheckResult {
    SkillCheckResult::evaluate(roll_percentile(source), target)
}

/// Apply `difficulty` to `base` and resolve. The adjusted target is kept on the result.
pub fn resolve_with_difficulty(
    base: i32,
    difficulty: Difficulty,
    source: &dyn DiceSource,
) -> SkillCheckResult {
    resolve_skill_check(difficulty.apply(base), source)
}
