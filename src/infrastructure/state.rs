//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::services::{
    CheckServiceImpl, EncounterServiceImpl, InvestigatorServiceImpl, NpcServiceImpl,
};
use crate::domain::services::DiceSource;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::{Repositories, RepositoryFactory};
use crate::infrastructure::random::{SeededDice, SystemDice};

/// Shared application state
pub struct AppState {
    /// Dice for stateless rolls that do not go through a service
    pub dice: Arc<dyn DiceSource>,
    // Application services
    pub investigator_service: InvestigatorServiceImpl,
    pub check_service: CheckServiceImpl,
    pub npc_service: NpcServiceImpl,
    pub encounter_service: EncounterServiceImpl,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let repositories = RepositoryFactory::create(config).await?;

        let dice: Arc<dyn DiceSource> = match config.dice_seed {
            Some(seed) => {
                tracing::info!(seed, "Using seeded dice");
                Arc::new(SeededDice::new(seed))
            }
            None => Arc::new(SystemDice::new()),
        };

        Ok(Self::from_parts(repositories, dice))
    }

    /// Wire services around existing repositories and dice
    pub fn from_parts(repositories: Repositories, dice: Arc<dyn DiceSource>) -> Self {
        let investigator_service =
            InvestigatorServiceImpl::new(repositories.investigators.clone(), dice.clone());
        let check_service = CheckServiceImpl::new(repositories.investigators, dice.clone());
        let npc_service = NpcServiceImpl::new(repositories.npcs, dice.clone());
        let encounter_service = EncounterServiceImpl::new(repositories.encounters);

        Self {
            dice,
            investigator_service,
            check_service,
            npc_service,
            encounter_service,
        }
    }
}
