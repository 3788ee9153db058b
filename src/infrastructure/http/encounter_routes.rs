//! Encounter API routes for the Keeper

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    CommandResponseDto, CreateEncounterRequestDto, EncounterListDto, SpawnedEncounterDto,
};
use crate::application::services::encounter_service::{
    created_view, keeper_view, list_view, public_view,
};
use crate::application::services::{CreateEncounterRequest, EncounterError, EncounterService};
use crate::domain::entities::Encounter;
use crate::domain::value_objects::{GuildId, UserId};
use crate::infrastructure::state::AppState;

fn error_response(e: EncounterError) -> (StatusCode, String) {
    let status = match &e {
        EncounterError::AlreadyExists(_) => StatusCode::CONFLICT,
        EncounterError::NotFound(_) => StatusCode::NOT_FOUND,
        EncounterError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EncounterError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

/// List a guild's encounters, newest first
pub async fn list_encounters(
    State(state): State<Arc<AppState>>,
    Path(guild_id): Path<String>,
) -> Result<Json<CommandResponseDto<EncounterListDto>>, (StatusCode, String)> {
    let encounters = state
        .encounter_service
        .list_encounters(&GuildId::new(guild_id))
        .await
        .map_err(error_response)?;

    let display = list_view(&encounters);
    Ok(Json(CommandResponseDto::new(EncounterListDto { encounters }, display)))
}

/// Save a new encounter
pub async fn create_encounter(
    State(state): State<Arc<AppState>>,
    Path(guild_id): Path<String>,
    Json(req): Json<CreateEncounterRequestDto>,
) -> Result<(StatusCode, Json<CommandResponseDto<Encounter>>), (StatusCode, String)> {
    let service_request = CreateEncounterRequest {
        guild_id: GuildId::new(guild_id),
        name: req.name,
        location: req.location,
        description: req.description,
        requirements: req.requirements,
        rewards: req.rewards,
        private_notes: req.private_notes,
        created_by: UserId::new(req.created_by),
    };

    let encounter = state
        .encounter_service
        .create_encounter(service_request)
        .await
        .map_err(error_response)?;

    let display = created_view(&encounter);
    Ok((StatusCode::CREATED, Json(CommandResponseDto::new(encounter, display))))
}

/// Spring an encounter on the table
pub async fn spawn_encounter(
    State(state): State<Arc<AppState>>,
    Path((guild_id, name)): Path<(String, String)>,
) -> Result<Json<SpawnedEncounterDto>, (StatusCode, String)> {
    let encounter = state
        .encounter_service
        .spawn_encounter(&GuildId::new(guild_id), &name)
        .await
        .map_err(error_response)?;

    let display = public_view(&encounter);
    let keeper_display = keeper_view(&encounter);
    Ok(Json(SpawnedEncounterDto {
        encounter,
        display,
        keeper_display,
    }))
}
