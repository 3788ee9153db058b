//! Dice notation parser
//!
//! Reads free-form expressions like `3d6+2`, `d20 adv`, `4d6 drop lowest` or
//! `2d10 - 1 drop highest 1` into a [`RollSpecification`].

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::domain::value_objects::{DiceError, RollSpecification};

static DICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)?d(\d+)(?:\s?([+-])\s?(\d+))?").expect("valid regex")
});
static ADVANTAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"advantage|adv").expect("valid regex"));
static DISADVANTAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"disadvantage|dis").expect("valid regex"));
static DROP_LOWEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"drop\s+lowest(?:\s*(\d+))?").expect("valid regex"));
static DROP_HIGHEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"drop\s+highest(?:\s*(\d+))?").expect("valid regex"));

const INVALID_NOTATION: &str = "Invalid dice notation";

/// Parse a dice expression.
///
/// Matching is case-insensitive and runs on the whitespace-collapsed input.
/// Whether advantage is paired with a d20 is left to evaluation.
pub fn parse_dice(expression: &str) -> Result<RollSpecification, DiceError> {
    let clean = expression
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let caps = DICE_RE
        .captures(&clean)
        .ok_or_else(|| DiceError::Parse(INVALID_NOTATION.to_string()))?;

    let count = match caps.get(1) {
        Some(m) => parse_number::<u32>(m.as_str(), "dice count")?,
        None => 1,
    };
    if count == 0 {
        return Err(DiceError::Parse(
            "Invalid dice notation: must roll at least one die".to_string(),
        ));
    }

    let sides = parse_number::<u32>(&caps[2], "die size")?;
    if sides < 2 {
        return Err(DiceError::Parse(
            "Invalid dice notation: dice need at least two sides".to_string(),
        ));
    }

    let modifier = match (caps.get(3), caps.get(4)) {
        (Some(sign), Some(value)) => {
            let magnitude = parse_number::<i64>(value.as_str(), "modifier")?;
            if sign.as_str() == "-" {
                -magnitude
            } else {
                magnitude
            }
        }
        _ => 0,
    };

    let mut spec = RollSpecification::new(count, sides).with_modifier(modifier);

    if let Some(n) = drop_count(&DROP_LOWEST_RE, &clean)? {
        spec = spec.with_drop_lowest(n);
    }
    if let Some(n) = drop_count(&DROP_HIGHEST_RE, &clean)? {
        spec = spec.with_drop_highest(n);
    }
    // "disadvantage" contains "advantage", so look for advantage in what is left
    let without_disadvantage = DISADVANTAGE_RE.replace_all(&clean, " ");
    if ADVANTAGE_RE.is_match(&without_disadvantage) {
        spec = spec.with_advantage();
    }
    if DISADVANTAGE_RE.is_match(&clean) {
        spec = spec.with_disadvantage();
    }

    Ok(spec)
}

fn drop_count(re: &Regex, clean: &str) -> Result<Option<u32>, DiceError> {
    match re.captures(clean) {
        Some(caps) => match caps.get(1) {
            Some(n) => Ok(Some(parse_number::<u32>(n.as_str(), "drop count")?)),
            None => Ok(Some(1)),
        },
        None => Ok(None),
    }
}

fn parse_number<T: std::str::FromStr>(digits: &str, what: &str) -> Result<T, DiceError> {
    digits
        .parse::<T>()
        .map_err(|_| DiceError::Parse(format!("{}: {} is too large", INVALID_NOTATION, what)))
}
