//! Stateless dice routes

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::application::dto::{
    CommandResponseDto, KeeperRollDto, KeeperRollRequestDto, PercentileDto, RollRequestDto,
    RollResponseDto, TargetCheckRequestDto,
};
use crate::domain::services::roll_format::{
    format_keeper_roll, format_percentile, format_roll, format_skill_check,
};
use crate::domain::services::{resolve_skill_check, roll_dice, roll_percentile};
use crate::domain::value_objects::SkillCheckResult;
use crate::infrastructure::state::AppState;

/// Roll a dice expression such as `3d6+2` or `d20 advantage`
pub async fn roll(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RollRequestDto>,
) -> Result<Json<RollResponseDto>, (StatusCode, String)> {
    let result = roll_dice(&req.expression, state.dice.as_ref())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    tracing::debug!(expression = %result.expression, total = result.total, "Rolled dice");

    let display = format_roll(&result);
    Ok(Json(CommandResponseDto::new(result, display)))
}

/// Keeper roll, hidden from players by default
pub async fn keeper_roll(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KeeperRollRequestDto>,
) -> Result<Json<CommandResponseDto<KeeperRollDto>>, (StatusCode, String)> {
    let roll = roll_dice(&req.expression, state.dice.as_ref())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    tracing::debug!(expression = %roll.expression, total = roll.total, hidden = req.hidden, "Keeper roll");

    let display = format_keeper_roll(&roll, req.description.as_deref(), req.hidden);
    let result = KeeperRollDto {
        roll,
        description: req.description,
        hidden: req.hidden,
    };
    Ok(Json(CommandResponseDto::new(result, display)))
}

/// Roll a single d100
pub async fn d100(State(state): State<Arc<AppState>>) -> Json<CommandResponseDto<PercentileDto>> {
    let roll = roll_percentile(state.dice.as_ref());
    Json(CommandResponseDto::new(PercentileDto { roll }, format_percentile(roll)))
}

/// Percentile check against a target supplied by the caller
pub async fn skill_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TargetCheckRequestDto>,
) -> Json<CommandResponseDto<SkillCheckResult>> {
    let result = resolve_skill_check(req.target, state.dice.as_ref());
    let display = format_skill_check(&result);
    Json(CommandResponseDto::new(result, display))
}
