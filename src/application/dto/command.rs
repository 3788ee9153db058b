use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Difficulty, RollResult, SanitySeverity};

/// A command result together with the chat text the bot posts for it
#[derive(Debug, Serialize)]
pub struct CommandResponseDto<T: Serialize> {
    #[serde(flatten)]
    pub result: T,
    pub display: String,
}

impl<T: Serialize> CommandResponseDto<T> {
    pub fn new(result: T, display: String) -> Self {
        Self { result, display }
    }
}

#[derive(Debug, Deserialize)]
pub struct RollRequestDto {
    pub expression: String,
}

pub type RollResponseDto = CommandResponseDto<RollResult>;

/// Keeper roll, hidden from players unless asked otherwise
#[derive(Debug, Deserialize)]
pub struct KeeperRollRequestDto {
    pub expression: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "hidden_by_default")]
    pub hidden: bool,
}

fn hidden_by_default() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct KeeperRollDto {
    #[serde(flatten)]
    pub roll: RollResult,
    pub description: Option<String>,
    pub hidden: bool,
}

#[derive(Debug, Serialize)]
pub struct PercentileDto {
    pub roll: u32,
}

#[derive(Debug, Deserialize)]
pub struct TargetCheckRequestDto {
    pub target: i32,
}

#[derive(Debug, Deserialize)]
pub struct SkillCheckRequestDto {
    pub skill: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
pub struct SanityCheckRequestDto {
    pub severity: SanitySeverity,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LuckRollRequestDto {
    #[serde(default = "spend_by_default")]
    pub spend: bool,
}

fn spend_by_default() -> bool {
    true
}
