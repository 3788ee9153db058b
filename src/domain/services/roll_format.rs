//! Chat display strings for rolls and checks

use crate::domain::value_objects::{Difficulty, RollResult, SkillCheckResult};

/// `🎲 **3d6+2**`, the kept rolls when there is more than one, then the total
pub fn format_roll(result: &RollResult) -> String {
    let mut output = format!("🎲 **{}**\n", result.expression);

    if result.rolls.len() > 1 {
        let rolls: Vec<String> = result.rolls.iter().map(|r| r.to_string()).collect();
        output.push_str(&format!("Rolls: [{}]", rolls.join(", ")));
        if result.modifier != 0 {
            output.push_str(&format!(" {:+}", result.modifier));
        }
        output.push('\n');
    }

    output.push_str(&format!("**Total: {}**", result.total));

    if result.critical_success {
        output.push_str(" 🎉 **CRITICAL SUCCESS!**");
    }
    if result.critical_failure {
        output.push_str(" 💥 **CRITICAL FAILURE!**");
    }

    output
}

/// Keeper roll. Hidden rolls are locked and flagged as kept from the players.
pub fn format_keeper_roll(result: &RollResult, description: Option<&str>, hidden: bool) -> String {
    let mut output = match description {
        Some(description) => format!("🎲 **Keeper Roll: {}**\n", description),
        None => "🎲 **Keeper Roll**\n".to_string(),
    };
    output.push_str(&format!("Expression: `{}`\n", result.expression));
    output.push_str(&format!("Result: **{}**", result.total));
    if result.rolls.len() > 1 {
        let rolls: Vec<String> = result.rolls.iter().map(|r| r.to_string()).collect();
        output.push_str(&format!(" ({})", rolls.join(" + ")));
    }

    if hidden {
        format!("🔒 {}\n\n*This roll is hidden from players*", output)
    } else {
        output
    }
}

pub fn format_skill_check(result: &SkillCheckResult) -> String {
    format!(
        "🎲 **Call of Cthulhu Skill Check**\nTarget: {}% | Rolled: **{}**\n\n{}",
        result.target,
        result.roll,
        result.tier().banner()
    )
}

pub fn format_percentile(roll: u32) -> String {
    format!("🎲 **d100**: **{}**", roll)
}

/// A check made by a named investigator or NPC against one of their values
pub fn format_named_check(
    name: &str,
    label: &str,
    difficulty: Difficulty,
    base: i32,
    result: &SkillCheckResult,
) -> String {
    format!(
        "🎲 **{}** - {}{}\nBase Skill: {}% | Target: {}% | Rolled: **{}**\n\n{}",
        name,
        capitalize(label),
        difficulty.label(),
        base,
        result.target,
        result.roll,
        result.tier().banner()
    )
}

/// Uppercase the first character, leave the rest alone
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
