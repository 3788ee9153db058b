//! Application services - Use case implementations
//!
//! Each service owns its repository port and a dice source, loads whole
//! records, applies domain rules and writes the result back.

pub mod check_service;
pub mod encounter_service;
pub mod investigator_service;
pub mod npc_service;

pub use check_service::{
    CheckError, CheckService, CheckServiceImpl, LuckRollOutcome, SanityCheckOutcome,
    SkillCheckOutcome,
};

pub use encounter_service::{
    CreateEncounterRequest, EncounterError, EncounterService, EncounterServiceImpl,
};

pub use investigator_service::{
    CreateInvestigatorRequest, InvestigatorError, InvestigatorService, InvestigatorServiceImpl,
};

pub use npc_service::{
    parse_characteristic_list, parse_skill_list, stat_block, CreateNpcRequest, NpcError,
    NpcRollOutcome, NpcService, NpcServiceImpl, NpcStats,
};
