//! In-memory repositories
//!
//! Records are cloned in and out so callers never hold a reference into the
//! map. Contents are lost when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{
    EncounterRepositoryPort, InvestigatorRepositoryPort, NpcRepositoryPort, RepositoryError,
};
use crate::domain::entities::{name_key, Encounter, Investigator, Npc};
use crate::domain::value_objects::{GuildId, UserId};

#[derive(Default)]
pub struct InMemoryInvestigatorRepository {
    records: RwLock<HashMap<UserId, Investigator>>,
}

impl InMemoryInvestigatorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvestigatorRepositoryPort for InMemoryInvestigatorRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<Investigator>, RepositoryError> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn create(&self, investigator: &Investigator) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        if records.contains_key(&investigator.user_id) {
            return Err(RepositoryError::Conflict(format!(
                "investigator for user {}",
                investigator.user_id
            )));
        }
        records.insert(investigator.user_id.clone(), investigator.clone());
        Ok(())
    }

    async fn save(&self, investigator: &Investigator) -> Result<(), RepositoryError> {
        self.records
            .write()
            .await
            .insert(investigator.user_id.clone(), investigator.clone());
        Ok(())
    }
}

/// NPCs keyed by guild, then lowercased name
#[derive(Default)]
pub struct InMemoryNpcRepository {
    records: RwLock<HashMap<GuildId, HashMap<String, Npc>>>,
}

impl InMemoryNpcRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NpcRepositoryPort for InMemoryNpcRepository {
    async fn create(&self, npc: &Npc) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        let guild = records.entry(npc.guild_id.clone()).or_default();
        let key = npc.name_key();
        if guild.contains_key(&key) {
            return Err(RepositoryError::Conflict(format!(
                "NPC {} in guild {}",
                npc.name, npc.guild_id
            )));
        }
        guild.insert(key, npc.clone());
        Ok(())
    }

    async fn get_by_name(
        &self,
        guild_id: &GuildId,
        name: &str,
    ) -> Result<Option<Npc>, RepositoryError> {
        Ok(self
            .records
            .read()
            .await
            .get(guild_id)
            .and_then(|guild| guild.get(&name_key(name)))
            .cloned())
    }

    async fn list(&self, guild_id: &GuildId) -> Result<Vec<Npc>, RepositoryError> {
        let records = self.records.read().await;
        let mut npcs: Vec<Npc> = records
            .get(guild_id)
            .map(|guild| guild.values().cloned().collect())
            .unwrap_or_default();
        npcs.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name_key().cmp(&b.name_key()))
        });
        Ok(npcs)
    }
}

#[derive(Default)]
pub struct InMemoryEncounterRepository {
    records: RwLock<HashMap<GuildId, HashMap<String, Encounter>>>,
}

impl InMemoryEncounterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EncounterRepositoryPort for InMemoryEncounterRepository {
    async fn create(&self, encounter: &Encounter) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        let guild = records.entry(encounter.guild_id.clone()).or_default();
        let key = encounter.name_key();
        if guild.contains_key(&key) {
            return Err(RepositoryError::Conflict(format!(
                "encounter {} in guild {}",
                encounter.name, encounter.guild_id
            )));
        }
        guild.insert(key, encounter.clone());
        Ok(())
    }

    async fn get_by_name(
        &self,
        guild_id: &GuildId,
        name: &str,
    ) -> Result<Option<Encounter>, RepositoryError> {
        Ok(self
            .records
            .read()
            .await
            .get(guild_id)
            .and_then(|guild| guild.get(&name_key(name)))
            .cloned())
    }

    async fn list(&self, guild_id: &GuildId) -> Result<Vec<Encounter>, RepositoryError> {
        let records = self.records.read().await;
        let mut encounters: Vec<Encounter> = records
            .get(guild_id)
            .map(|guild| guild.values().cloned().collect())
            .unwrap_or_default();
        encounters.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name_key().cmp(&b.name_key()))
        });
        Ok(encounters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NpcTemplate;
    use crate::domain::value_objects::Characteristics;

    fn investigator(user: &str) -> Investigator {
        Investigator::new(
            UserId::new(user),
            "Harvey Walters",
            "Journalist",
            42,
            Characteristics::uniform(50),
        )
    }

    #[tokio::test]
    async fn test_investigator_create_conflicts() {
        let repo = InMemoryInvestigatorRepository::new();
        repo.create(&investigator("u1")).await.unwrap();
        assert!(matches!(
            repo.create(&investigator("u1")).await,
            Err(RepositoryError::Conflict(_))
        ));
        assert!(repo.get(&UserId::new("u2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_investigator_save_replaces() {
        let repo = InMemoryInvestigatorRepository::new();
        let mut record = investigator("u1");
        repo.create(&record).await.unwrap();
        record.set_sanity(12);
        repo.save(&record).await.unwrap();
        let stored = repo.get(&UserId::new("u1")).await.unwrap().unwrap();
        assert_eq!(stored.sanity.current, 12);
    }

    #[tokio::test]
    async fn test_npc_lookup_ignores_case() {
        let repo = InMemoryNpcRepository::new();
        let npc = Npc::new(
            GuildId::new("g1"),
            "Wilbur Whateley",
            NpcTemplate::Monster.characteristics().unwrap(),
            UserId::new("keeper"),
        );
        repo.create(&npc).await.unwrap();

        let found = repo
            .get_by_name(&GuildId::new("g1"), "  WILBUR whateley ")
            .await
            .unwrap();
        assert_eq!(found.map(|n| n.id), Some(npc.id));
        assert!(repo
            .get_by_name(&GuildId::new("g2"), "Wilbur Whateley")
            .await
            .unwrap()
            .is_none());
        assert!(repo.list(&GuildId::new("g2")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_npc_list_is_newest_first() {
        let repo = InMemoryNpcRepository::new();
        let base = chrono::Utc::now();
        for (minutes, name) in [(0, "Abel Keane"), (5, "Zebulon Whateley"), (2, "Lavinia Whateley")] {
            let mut npc = Npc::new(
                GuildId::new("g1"),
                name,
                NpcTemplate::Cultist.characteristics().unwrap(),
                UserId::new("keeper"),
            );
            npc.created_at = base + chrono::Duration::minutes(minutes);
            repo.create(&npc).await.unwrap();
        }

        let names: Vec<String> = repo
            .list(&GuildId::new("g1"))
            .await
            .unwrap()
            .into_iter()
            .map(|npc| npc.name)
            .collect();
        assert_eq!(names, vec!["Zebulon Whateley", "Lavinia Whateley", "Abel Keane"]);
    }

    #[tokio::test]
    async fn test_encounter_names_are_unique_per_guild() {
        let repo = InMemoryEncounterRepository::new();
        let encounter = |guild: &str, name: &str| {
            Encounter::new(
                GuildId::new(guild),
                name,
                "Innsmouth docks",
                "Fog rolls in off the reef",
                UserId::new("keeper"),
            )
        };
        repo.create(&encounter("g1", "Devil Reef")).await.unwrap();
        repo.create(&encounter("g2", "Devil Reef")).await.unwrap();
        assert!(matches!(
            repo.create(&encounter("g1", "devil reef")).await,
            Err(RepositoryError::Conflict(_))
        ));
        assert!(repo
            .get_by_name(&GuildId::new("g1"), "DEVIL REEF")
            .await
            .unwrap()
            .is_some());
        assert_eq!(repo.list(&GuildId::new("g1")).await.unwrap().len(), 1);
    }
}
