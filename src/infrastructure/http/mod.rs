//! HTTP REST API routes
//!
//! One route per bot command. Handlers return the command's result plus a
//! `display` string ready to post to chat.

mod check_routes;
mod encounter_routes;
mod investigator_routes;
mod npc_routes;
mod roll_routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Dice routes
        .route("/api/roll", post(roll_routes::roll))
        .route("/api/d100", get(roll_routes::d100))
        .route("/api/skill-check", post(roll_routes::skill_check))
        .route("/api/keeper/rolls", post(roll_routes::keeper_roll))
        // Investigator routes
        .route(
            "/api/investigators/{user_id}",
            post(investigator_routes::create_investigator),
        )
        .route(
            "/api/investigators/{user_id}",
            get(investigator_routes::get_investigator),
        )
        .route(
            "/api/investigators/{user_id}/skills/{skill}",
            put(investigator_routes::update_skill),
        )
        .route(
            "/api/investigators/{user_id}/backstory",
            put(investigator_routes::update_backstory),
        )
        .route(
            "/api/investigators/{user_id}/sanity",
            put(investigator_routes::update_sanity),
        )
        .route(
            "/api/investigators/{user_id}/luck",
            put(investigator_routes::update_luck),
        )
        .route(
            "/api/investigators/{user_id}/conditions",
            post(investigator_routes::add_condition),
        )
        .route(
            "/api/investigators/{user_id}/conditions/{condition}",
            delete(investigator_routes::remove_condition),
        )
        // Check routes
        .route(
            "/api/investigators/{user_id}/checks",
            post(check_routes::skill_check),
        )
        .route(
            "/api/investigators/{user_id}/sanity-checks",
            post(check_routes::sanity_check),
        )
        .route(
            "/api/investigators/{user_id}/luck-rolls",
            post(check_routes::luck_roll),
        )
        // NPC routes
        .route("/api/guilds/{guild_id}/npcs", get(npc_routes::list_npcs))
        .route("/api/guilds/{guild_id}/npcs", post(npc_routes::create_npc))
        .route(
            "/api/guilds/{guild_id}/npcs/{name}",
            get(npc_routes::get_npc),
        )
        .route(
            "/api/guilds/{guild_id}/npcs/{name}/rolls",
            post(npc_routes::npc_roll),
        )
        // Encounter routes
        .route(
            "/api/guilds/{guild_id}/encounters",
            get(encounter_routes::list_encounters),
        )
        .route(
            "/api/guilds/{guild_id}/encounters",
            post(encounter_routes::create_encounter),
        )
        .route(
            "/api/guilds/{guild_id}/encounters/{name}/spawn",
            post(encounter_routes::spawn_encounter),
        )
}
