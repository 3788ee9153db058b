//! Dice roll evaluation against an injected source of randomness

use crate::domain::services::dice_notation::parse_dice;
use crate::domain::value_objects::{
    Characteristic, Characteristics, DiceError, RollResult, RollSpecification, MAX_DICE,
};

/// Source of uniformly distributed die faces
pub trait DiceSource: Send + Sync {
    /// A value in `1..=sides`
    fn roll_die(&self, sides: u32) -> u32;
}

/// Parse `notation` and roll it. The result keeps the expression as typed.
pub fn roll_dice(notation: &str, source: &dyn DiceSource) -> Result<RollResult, DiceError> {
    let spec = parse_dice(notation)?;
    roll_with_expression(&spec, notation.trim().to_string(), source)
}

/// Roll an already structured specification
pub fn evaluate_roll(
    spec: &RollSpecification,
    source: &dyn DiceSource,
) -> Result<RollResult, DiceError> {
    roll_with_expression(spec, spec.to_string(), source)
}

/// A single percentile roll in `1..=100`
pub fn roll_percentile(source: &dyn DiceSource) -> u32 {
    source.roll_die(100)
}

/// 3d6x5 for every characteristic, in sheet order
pub fn roll_characteristics(source: &dyn DiceSource) -> Characteristics {
    let mut characteristics = Characteristics::uniform(0);
    for characteristic in Characteristic::ALL {
        let sum: u32 = (0..3).map(|_| source.roll_die(6)).sum();
        characteristics.set(characteristic, sum as i32 * 5);
    }
    characteristics
}

fn validate(spec: &RollSpecification) -> Result<(), DiceError> {
    if spec.count == 0 || spec.sides < 2 {
        return Err(DiceError::InvalidRoll(format!(
            "Cannot roll {}d{}",
            spec.count, spec.sides
        )));
    }
    if spec.advantage && spec.disadvantage {
        return Err(DiceError::InvalidRoll(
            "Cannot roll with both advantage and disadvantage".to_string(),
        ));
    }
    if (spec.advantage || spec.disadvantage) && !spec.is_d20() {
        return Err(DiceError::InvalidRoll(
            "Advantage/disadvantage only works with d20".to_string(),
        ));
    }
    if spec.count > MAX_DICE {
        return Err(DiceError::InvalidRoll(format!(
            "Cannot roll more than {} dice at once",
            MAX_DICE
        )));
    }
    Ok(())
}

fn roll_with_expression(
    spec: &RollSpecification,
    expression: String,
    source: &dyn DiceSource,
) -> Result<RollResult, DiceError> {
    validate(spec)?;

    let (raw_rolls, rolls) = if spec.advantage || spec.disadvantage {
        let first = source.roll_die(20);
        let second = source.roll_die(20);
        let kept = if spec.advantage {
            first.max(second)
        } else {
            first.min(second)
        };
        (vec![first, second], vec![kept])
    } else {
        let raw: Vec<u32> = (0..spec.count).map(|_| source.roll_die(spec.sides)).collect();
        let kept = apply_drops(spec, &raw);
        (raw, kept)
    };

    let sum: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
    let total = sum.saturating_add(spec.modifier);
    let critical_success = spec.is_d20() && rolls.contains(&20);
    let critical_failure = spec.is_d20() && rolls.contains(&1);

    Ok(RollResult {
        rolls,
        raw_rolls,
        total,
        modifier: spec.modifier,
        expression,
        critical_success,
        critical_failure,
    })
}

/// Drop lowest wins when both are present. Counts outside `1..count` are ignored.
fn apply_drops(spec: &RollSpecification, raw: &[u32]) -> Vec<u32> {
    let applies = |n: Option<u32>| n.filter(|&n| n > 0 && (n as usize) < raw.len());

    let mut kept = raw.to_vec();
    if let Some(n) = applies(spec.drop_lowest) {
        kept.sort_by(|a, b| b.cmp(a));
        kept.truncate(raw.len() - n as usize);
    } else if let Some(n) = applies(spec.drop_highest) {
        kept.sort();
        kept.truncate(raw.len() - n as usize);
    }
    kept
}
