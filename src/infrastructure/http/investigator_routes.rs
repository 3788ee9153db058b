//! Investigator API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    CommandResponseDto, ConditionRequestDto, CreateInvestigatorRequestDto, SetValueRequestDto,
};
use crate::application::services::{
    CreateInvestigatorRequest, InvestigatorError, InvestigatorService,
};
use crate::domain::entities::{Backstory, Investigator};
use crate::domain::services::sheet_format::format_character_sheet;
use crate::domain::value_objects::UserId;
use crate::infrastructure::state::AppState;

fn error_response(e: InvestigatorError) -> (StatusCode, String) {
    let status = match &e {
        InvestigatorError::AlreadyExists(_) => StatusCode::CONFLICT,
        InvestigatorError::NotFound(_) => StatusCode::NOT_FOUND,
        InvestigatorError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        InvestigatorError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

/// Create the user's investigator
pub async fn create_investigator(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<CreateInvestigatorRequestDto>,
) -> Result<(StatusCode, Json<Investigator>), (StatusCode, String)> {
    let service_request = CreateInvestigatorRequest {
        user_id: UserId::new(user_id),
        name: req.name,
        occupation: req.occupation,
        age: req.age,
        method: req.method,
        characteristics: req.characteristics,
    };

    let investigator = state
        .investigator_service
        .create_investigator(service_request)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(investigator)))
}

/// Get the user's investigator with its sheet summary
pub async fn get_investigator(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<CommandResponseDto<Investigator>>, (StatusCode, String)> {
    let investigator = state
        .investigator_service
        .get_investigator(&UserId::new(user_id))
        .await
        .map_err(error_response)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Investigator not found".to_string()))?;

    let display = format_character_sheet(&investigator);
    Ok(Json(CommandResponseDto::new(investigator, display)))
}

/// Set one skill, 0..=100
pub async fn update_skill(
    State(state): State<Arc<AppState>>,
    Path((user_id, skill)): Path<(String, String)>,
    Json(req): Json<SetValueRequestDto>,
) -> Result<Json<Investigator>, (StatusCode, String)> {
    if !(0..=100).contains(&req.value) {
        return Err((
            StatusCode::BAD_REQUEST,
            "Skill value must be between 0 and 100".to_string(),
        ));
    }

    let investigator = state
        .investigator_service
        .update_skill(&UserId::new(user_id), &skill, req.value)
        .await
        .map_err(error_response)?;

    Ok(Json(investigator))
}

/// Replace the backstory
pub async fn update_backstory(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(backstory): Json<Backstory>,
) -> Result<Json<Investigator>, (StatusCode, String)> {
    let investigator = state
        .investigator_service
        .update_backstory(&UserId::new(user_id), backstory)
        .await
        .map_err(error_response)?;

    Ok(Json(investigator))
}

pub async fn update_sanity(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<SetValueRequestDto>,
) -> Result<Json<Investigator>, (StatusCode, String)> {
    let investigator = state
        .investigator_service
        .update_sanity(&UserId::new(user_id), req.value)
        .await
        .map_err(error_response)?;

    Ok(Json(investigator))
}

pub async fn update_luck(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<SetValueRequestDto>,
) -> Result<Json<Investigator>, (StatusCode, String)> {
    let investigator = state
        .investigator_service
        .update_luck(&UserId::new(user_id), req.value)
        .await
        .map_err(error_response)?;

    Ok(Json(investigator))
}

pub async fn add_condition(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<ConditionRequestDto>,
) -> Result<Json<Investigator>, (StatusCode, String)> {
    if req.condition.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Condition cannot be empty".to_string(),
        ));
    }

    let investigator = state
        .investigator_service
        .add_condition(&UserId::new(user_id), req.condition.trim())
        .await
        .map_err(error_response)?;

    Ok(Json(investigator))
}

pub async fn remove_condition(
    State(state): State<Arc<AppState>>,
    Path((user_id, condition)): Path<(String, String)>,
) -> Result<Json<Investigator>, (StatusCode, String)> {
    let investigator = state
        .investigator_service
        .remove_condition(&UserId::new(user_id), &condition)
        .await
        .map_err(error_response)?;

    Ok(Json(investigator))
}
