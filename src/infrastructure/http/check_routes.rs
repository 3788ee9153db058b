//! Skill, sanity and luck check routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    CommandResponseDto, LuckRollRequestDto, SanityCheckRequestDto, SkillCheckRequestDto,
};
use crate::application::services::{
    CheckError, CheckService, LuckRollOutcome, SanityCheckOutcome, SkillCheckOutcome,
};
use crate::domain::value_objects::UserId;
use crate::infrastructure::state::AppState;

fn error_response(e: CheckError) -> (StatusCode, String) {
    let status = match &e {
        CheckError::NotFound(_) | CheckError::SkillNotFound { .. } => StatusCode::NOT_FOUND,
        CheckError::NoLuckRemaining { .. } | CheckError::Dice(_) => StatusCode::BAD_REQUEST,
        CheckError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

/// Roll against a skill on the user's sheet
pub async fn skill_check(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<SkillCheckRequestDto>,
) -> Result<Json<CommandResponseDto<SkillCheckOutcome>>, (StatusCode, String)> {
    let outcome = state
        .check_service
        .skill_check(&UserId::new(user_id), &req.skill, req.difficulty)
        .await
        .map_err(error_response)?;

    let display = outcome.display();
    Ok(Json(CommandResponseDto::new(outcome, display)))
}

pub async fn sanity_check(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<SanityCheckRequestDto>,
) -> Result<Json<CommandResponseDto<SanityCheckOutcome>>, (StatusCode, String)> {
    let outcome = state
        .check_service
        .sanity_check(&UserId::new(user_id), req.severity, req.description)
        .await
        .map_err(error_response)?;

    let display = outcome.display();
    Ok(Json(CommandResponseDto::new(outcome, display)))
}

pub async fn luck_roll(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<LuckRollRequestDto>,
) -> Result<Json<CommandResponseDto<LuckRollOutcome>>, (StatusCode, String)> {
    let outcome = state
        .check_service
        .luck_roll(&UserId::new(user_id), req.spend)
        .await
        .map_err(error_response)?;

    let display = outcome.display();
    Ok(Json(CommandResponseDto::new(outcome, display)))
}
