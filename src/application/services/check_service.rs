//! Check Service - Skill checks, sanity checks and luck rolls
//!
//! Each check reads the investigator, resolves one percentile roll against a
//! value on the sheet and, for sanity and luck, writes the new current value.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{InvestigatorRepositoryPort, RepositoryError};
use crate::domain::services::roll_format::format_named_check;
use crate::domain::services::{
    evaluate_roll, resolve_skill_check, resolve_with_difficulty, DiceSource,
};
use crate::domain::value_objects::{
    DiceError, Difficulty, SanitySeverity, SkillCheckResult, UserId,
};

pub const TEMPORARY_INSANITY: &str = "Temporary Insanity";
pub const INDEFINITE_INSANITY: &str = "Indefinite Insanity";

/// Sanity lost in one check that triggers temporary insanity
const TEMPORARY_INSANITY_LOSS: i32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("No investigator found for user {0}")]
    NotFound(UserId),
    #[error("Skill \"{skill}\" not found for {investigator}")]
    SkillNotFound { skill: String, investigator: String },
    #[error("{investigator} has no Luck points remaining (0/{starting})")]
    NoLuckRemaining { investigator: String, starting: i32 },
    #[error(transparent)]
    Dice(#[from] DiceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result of a skill check against the investigator's sheet
#[derive(Debug, Clone, Serialize)]
pub struct SkillCheckOutcome {
    pub investigator: String,
    /// Skill name as found on the sheet
    pub skill: String,
    pub base: i32,
    pub difficulty: Difficulty,
    pub result: SkillCheckResult,
}

impl SkillCheckOutcome {
    pub fn display(&self) -> String {
        format_named_check(
            &self.investigator,
            &self.skill,
            self.difficulty,
            self.base,
            &self.result,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SanityCheckOutcome {
    pub investigator: String,
    pub severity: SanitySeverity,
    pub description: Option<String>,
    pub result: SkillCheckResult,
    /// Loss expression that was rolled, `None` when nothing was at stake
    pub loss_expression: Option<String>,
    pub loss_rolls: Vec<u32>,
    pub loss: i32,
    pub previous: i32,
    pub current: i32,
    pub maximum: i32,
    pub indefinite_threshold: i32,
    pub conditions_added: Vec<String>,
}

impl SanityCheckOutcome {
    pub fn display(&self) -> String {
        let mut output = format!("🧠 **{}** - Sanity Check\n", self.investigator);
        if let Some(description) = &self.description {
            output.push_str(&format!("*{}*\n\n", description));
        }
        output.push_str(&format!(
            "Current Sanity: {} | Rolled: **{}**\n",
            self.previous, self.result.roll
        ));
        output.push_str(&format!("Severity: {}\n\n", self.severity));
        output.push_str(self.result.tier().banner());
        output.push('\n');

        if self.loss > 0 {
            let rolls: Vec<String> = self.loss_rolls.iter().map(|r| r.to_string()).collect();
            output.push_str(&format!(
                "\n💔 **Sanity Lost:** {} ({}) = **{}** points\n",
                self.loss_expression.as_deref().unwrap_or("0"),
                rolls.join("+"),
                self.loss
            ));
            output.push_str(&format!("🧠 **New Sanity:** {}/{}", self.current, self.maximum));
            if self.conditions_added.iter().any(|c| c == TEMPORARY_INSANITY) {
                output.push_str(&format!(
                    "\n\n⚠️ **Temporary Insanity!** (Lost {} sanity in one check)",
                    self.loss
                ));
            }
            if self.conditions_added.iter().any(|c| c == INDEFINITE_INSANITY) {
                output.push_str(&format!(
                    "\n\n🔥 **INDEFINITE INSANITY!** (Sanity ≤ {})",
                    self.indefinite_threshold
                ));
            }
        } else {
            output.push_str("\n💚 **No Sanity Lost!**\n");
            output.push_str(&format!(
                "🧠 **Current Sanity:** {}/{}",
                self.previous, self.maximum
            ));
        }
        output
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LuckRollOutcome {
    pub investigator: String,
    pub result: SkillCheckResult,
    pub spent: bool,
    pub previous: i32,
    pub current: i32,
    pub starting: i32,
}

impl LuckRollOutcome {
    pub fn display(&self) -> String {
        let mut output = format!("🍀 **{}** - Luck Roll\n", self.investigator);
        output.push_str(&format!(
            "Current Luck: {} | Rolled: **{}**\n\n",
            self.previous, self.result.roll
        ));
        output.push_str(self.result.tier().banner());
        output.push('\n');
        if self.spent {
            output.push_str(&format!(
                "\n💰 Luck spent! New Luck: **{}**/{}",
                self.current, self.starting
            ));
        } else if self.result.success {
            output.push_str(&format!(
                "\n💰 Luck not spent (current: {}/{})",
                self.current, self.starting
            ));
        } else {
            output.push_str(&format!(
                "\n💰 No Luck spent (current: {}/{})",
                self.current, self.starting
            ));
        }
        output
    }
}

#[async_trait]
pub trait CheckService: Send + Sync {
    /// Roll against a skill on the sheet, after difficulty
    async fn skill_check(
        &self,
        user_id: &UserId,
        skill: &str,
        difficulty: Difficulty,
    ) -> Result<SkillCheckOutcome, CheckError>;

    /// Roll against current sanity and apply the severity's loss
    async fn sanity_check(
        &self,
        user_id: &UserId,
        severity: SanitySeverity,
        description: Option<String>,
    ) -> Result<SanityCheckOutcome, CheckError>;

    /// Roll against current luck, spending a point on success when asked
    async fn luck_roll(&self, user_id: &UserId, spend: bool) -> Result<LuckRollOutcome, CheckError>;
}

pub struct CheckServiceImpl {
    repository: Arc<dyn InvestigatorRepositoryPort>,
    dice: Arc<dyn DiceSource>,
}

impl CheckServiceImpl {
    pub fn new(repository: Arc<dyn InvestigatorRepositoryPort>, dice: Arc<dyn DiceSource>) -> Self {
        Self { repository, dice }
    }
}

#[async_trait]
impl CheckService for CheckServiceImpl {
    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn skill_check(
        &self,
        user_id: &UserId,
        skill: &str,
        difficulty: Difficulty,
    ) -> Result<SkillCheckOutcome, CheckError> {
        let investigator = self
            .repository
            .get(user_id)
            .await?
            .ok_or_else(|| CheckError::NotFound(user_id.clone()))?;

        let (matched, base) = investigator.find_skill(skill).ok_or_else(|| {
            CheckError::SkillNotFound {
                skill: skill.trim().to_lowercase(),
                investigator: investigator.name.clone(),
            }
        })?;

        let result = resolve_with_difficulty(base, difficulty, self.dice.as_ref());
        debug!(skill = %matched, base, target = result.target, roll = result.roll, tier = %result.tier(), "Skill check");

        Ok(SkillCheckOutcome {
            investigator: investigator.name.clone(),
            skill: matched.to_string(),
            base,
            difficulty,
            result,
        })
    }

    #[instrument(skip(self, description), fields(user_id = %user_id))]
    async fn sanity_check(
        &self,
        user_id: &UserId,
        severity: SanitySeverity,
        description: Option<String>,
    ) -> Result<SanityCheckOutcome, CheckError> {
        let mut investigator = self
            .repository
            .get(user_id)
            .await?
            .ok_or_else(|| CheckError::NotFound(user_id.clone()))?;

        let previous = investigator.sanity.current;
        let result = resolve_skill_check(previous, self.dice.as_ref());

        let loss_spec = if result.success {
            severity.success_loss()
        } else {
            Some(severity.failure_loss())
        };
        let (loss_expression, loss_rolls, loss) = match loss_spec {
            Some(spec) => {
                let roll = evaluate_roll(&spec, self.dice.as_ref())?;
                // Loss dice are at most 1d20
                (Some(spec.to_string()), roll.rolls, roll.total as i32)
            }
            None => (None, Vec::new(), 0),
        };

        investigator.set_sanity(previous.saturating_sub(loss));
        let current = investigator.sanity.current;
        let threshold = investigator.sanity.indefinite_insanity_threshold();

        let mut conditions_added = Vec::new();
        if loss >= TEMPORARY_INSANITY_LOSS {
            investigator.add_condition(TEMPORARY_INSANITY);
            conditions_added.push(TEMPORARY_INSANITY.to_string());
        }
        if current <= threshold && previous > threshold {
            investigator.add_condition(INDEFINITE_INSANITY);
            conditions_added.push(INDEFINITE_INSANITY.to_string());
        }

        self.repository.save(&investigator).await?;
        info!(
            severity = %severity,
            roll = result.roll,
            loss,
            previous,
            current,
            "Sanity check"
        );

        Ok(SanityCheckOutcome {
            investigator: investigator.name.clone(),
            severity,
            description,
            result,
            loss_expression,
            loss_rolls,
            loss,
            previous,
            current,
            maximum: investigator.sanity.maximum,
            indefinite_threshold: threshold,
            conditions_added,
        })
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn luck_roll(&self, user_id: &UserId, spend: bool) -> Result<LuckRollOutcome, CheckError> {
        let mut investigator = self
            .repository
            .get(user_id)
            .await?
            .ok_or_else(|| CheckError::NotFound(user_id.clone()))?;

        let previous = investigator.luck.current;
        if previous <= 0 {
            return Err(CheckError::NoLuckRemaining {
                investigator: investigator.name.clone(),
                starting: investigator.luck.starting,
            });
        }

        let result = resolve_skill_check(previous, self.dice.as_ref());
        let spent = result.success && spend;
        if spent {
            investigator.set_luck(previous.saturating_sub(1));
            self.repository.save(&investigator).await?;
            info!(roll = result.roll, luck = investigator.luck.current, "Luck spent");
        } else {
            debug!(roll = result.roll, success = result.success, "Luck roll");
        }

        Ok(LuckRollOutcome {
            investigator: investigator.name.clone(),
            result,
            spent,
            previous,
            current: investigator.luck.current,
            starting: investigator.luck.starting,
        })
    }
}
