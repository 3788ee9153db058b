//! Domain entities - Core business objects with identity

mod encounter;
mod investigator;
mod npc;

pub use encounter::Encounter;
pub use investigator::{Backstory, Investigator, Weapon};
pub use npc::{name_key, Npc, NpcTemplate};
