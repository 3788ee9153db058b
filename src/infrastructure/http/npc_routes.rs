//! NPC API routes for the Keeper

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    CommandResponseDto, CreateNpcRequestDto, KeeperNpcResponseDto, NpcResponseDto,
    NpcRollRequestDto,
};
use crate::application::services::{
    parse_characteristic_list, parse_skill_list, CreateNpcRequest, NpcError, NpcRollOutcome,
    NpcService, NpcStats,
};
use crate::domain::value_objects::{GuildId, UserId};
use crate::infrastructure::state::AppState;

fn error_response(e: NpcError) -> (StatusCode, String) {
    let status = match &e {
        NpcError::AlreadyExists(_) => StatusCode::CONFLICT,
        NpcError::NotFound(_) | NpcError::TargetNotFound { .. } => StatusCode::NOT_FOUND,
        NpcError::InvalidStats(_) => StatusCode::BAD_REQUEST,
        NpcError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

/// List NPCs in a guild
pub async fn list_npcs(
    State(state): State<Arc<AppState>>,
    Path(guild_id): Path<String>,
) -> Result<Json<Vec<NpcResponseDto>>, (StatusCode, String)> {
    let npcs = state
        .npc_service
        .list_npcs(&GuildId::new(guild_id))
        .await
        .map_err(error_response)?;

    Ok(Json(npcs.into_iter().map(NpcResponseDto::from).collect()))
}

/// Show one NPC: the reveal for players plus the Keeper's full view
pub async fn get_npc(
    State(state): State<Arc<AppState>>,
    Path((guild_id, name)): Path<(String, String)>,
) -> Result<Json<KeeperNpcResponseDto>, (StatusCode, String)> {
    let npc = state
        .npc_service
        .get_npc(&GuildId::new(guild_id), &name)
        .await
        .map_err(error_response)?
        .ok_or_else(|| error_response(NpcError::NotFound(name)))?;

    Ok(Json(KeeperNpcResponseDto::from(npc)))
}

/// Create an NPC from a template or from the Keeper's stat form
pub async fn create_npc(
    State(state): State<Arc<AppState>>,
    Path(guild_id): Path<String>,
    Json(req): Json<CreateNpcRequestDto>,
) -> Result<(StatusCode, Json<NpcResponseDto>), (StatusCode, String)> {
    let stats = match (&req.characteristics, req.template) {
        (Some(characteristics), _) => NpcStats::Custom {
            characteristics: parse_characteristic_list(characteristics).map_err(error_response)?,
            skills: req.skills.as_deref().map(parse_skill_list).unwrap_or_default(),
        },
        (None, Some(template)) => NpcStats::Template(template),
        (None, None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Provide either a template or characteristics".to_string(),
            ))
        }
    };

    let service_request = CreateNpcRequest {
        guild_id: GuildId::new(guild_id),
        name: req.name,
        stats,
        description: req.description,
        private_notes: req.private_notes,
        created_by: UserId::new(req.created_by),
    };

    let npc = state
        .npc_service
        .create_npc(service_request)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(NpcResponseDto::from(npc))))
}

/// Roll for an NPC against a characteristic or skill
pub async fn npc_roll(
    State(state): State<Arc<AppState>>,
    Path((guild_id, name)): Path<(String, String)>,
    Json(req): Json<NpcRollRequestDto>,
) -> Result<Json<CommandResponseDto<NpcRollOutcome>>, (StatusCode, String)> {
    let outcome = state
        .npc_service
        .npc_roll(
            &GuildId::new(guild_id),
            &name,
            &req.target,
            req.difficulty,
            req.description,
        )
        .await
        .map_err(error_response)?;

    let display = outcome.display();
    Ok(Json(CommandResponseDto::new(outcome, display)))
}
