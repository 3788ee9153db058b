use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::npc_service::{keeper_view, public_view};
use crate::application::services::stat_block;
use crate::domain::entities::{Npc, NpcTemplate, Weapon};
use crate::domain::value_objects::{Characteristics, Difficulty, GuildId, NpcId, UserId};

/// Either a stock template or the Keeper's stat form
#[derive(Debug, Deserialize)]
pub struct CreateNpcRequestDto {
    pub name: String,
    #[serde(default)]
    pub template: Option<NpcTemplate>,
    /// `STR, DEX, INT, CON, APP, POW, SIZ, EDU`, takes precedence over `template`
    #[serde(default)]
    pub characteristics: Option<String>,
    /// `name:value, name:value`
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private_notes: Option<String>,
    pub created_by: String,
}

/// NPC stat block without the Keeper's private notes
#[derive(Debug, Serialize)]
pub struct NpcResponseDto {
    pub id: NpcId,
    pub guild_id: GuildId,
    pub name: String,
    pub characteristics: Characteristics,
    pub hit_points: i32,
    pub sanity: i32,
    pub skills: BTreeMap<String, i32>,
    pub weapons: Vec<Weapon>,
    pub description: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub display: String,
}

impl From<Npc> for NpcResponseDto {
    fn from(npc: Npc) -> Self {
        let display = stat_block(&npc);
        Self {
            id: npc.id,
            guild_id: npc.guild_id,
            name: npc.name,
            characteristics: npc.characteristics,
            hit_points: npc.hit_points,
            sanity: npc.sanity,
            skills: npc.skills,
            weapons: npc.weapons,
            description: npc.description,
            created_by: npc.created_by,
            created_at: npc.created_at,
            display,
        }
    }
}

/// Full NPC record with a player-facing reveal and the Keeper's private view
#[derive(Debug, Serialize)]
pub struct KeeperNpcResponseDto {
    #[serde(flatten)]
    pub npc: Npc,
    pub display: String,
    pub keeper_display: String,
}

impl From<Npc> for KeeperNpcResponseDto {
    fn from(npc: Npc) -> Self {
        let display = public_view(&npc);
        let keeper_display = keeper_view(&npc);
        Self {
            npc,
            display,
            keeper_display,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NpcRollRequestDto {
    pub target: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: Option<String>,
}
