//! NPC Service - Keeper stat blocks and rolls made on their behalf

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{NpcRepositoryPort, RepositoryError};
use crate::domain::entities::{Npc, NpcTemplate};
use crate::domain::services::derived_attributes::damage_bonus_and_build;
use crate::domain::services::{resolve_with_difficulty, roll_characteristics, DiceSource};
use crate::domain::value_objects::{
    Characteristic, Characteristics, Difficulty, GuildId, SkillCheckResult, UserId,
};

const CHARACTERISTIC_RANGE: std::ops::RangeInclusive<i32> = 1..=100;
const SKILL_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

#[derive(Debug, thiserror::Error)]
pub enum NpcError {
    #[error("An NPC named \"{0}\" already exists")]
    AlreadyExists(String),
    #[error("No NPC named \"{0}\" found")]
    NotFound(String),
    #[error("\"{query}\" not found for {npc}")]
    TargetNotFound { npc: String, query: String },
    #[error("Invalid NPC stats: {0}")]
    InvalidStats(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Where a new NPC's numbers come from
#[derive(Debug, Clone)]
pub enum NpcStats {
    Template(NpcTemplate),
    /// Keeper-entered characteristics and skills
    Custom {
        characteristics: Characteristics,
        skills: BTreeMap<String, i32>,
    },
}

#[derive(Debug, Clone)]
pub struct CreateNpcRequest {
    pub guild_id: GuildId,
    pub name: String,
    pub stats: NpcStats,
    pub description: Option<String>,
    pub private_notes: Option<String>,
    pub created_by: UserId,
}

#[derive(Debug, Clone, Serialize)]
pub struct NpcRollOutcome {
    pub npc: String,
    /// Characteristic abbreviation or skill name rolled against
    pub target: String,
    pub base: i32,
    pub difficulty: Difficulty,
    pub description: Option<String>,
    pub result: SkillCheckResult,
}

impl NpcRollOutcome {
    pub fn display(&self) -> String {
        let mut output = format!(
            "🎲 **{} - {}{}**\n",
            self.npc,
            self.target,
            self.difficulty.label()
        );
        if let Some(description) = &self.description {
            output.push_str(&format!("*{}*\n\n", description));
        }
        output.push_str(&format!(
            "**Target:** {}% | **Rolled:** {}\n\n",
            self.result.target, self.result.roll
        ));
        output.push_str(self.result.tier().banner());
        output
    }
}

/// Public stat block, private notes left out
pub fn stat_block(npc: &Npc) -> String {
    let c = &npc.characteristics;
    let damage_bonus = damage_bonus_and_build(c.strength, c.size).damage_bonus;
    let mut output = format!(
        "👤 **{}**\nSTR: {} | DEX: {} | INT: {} | CON: {}\nAPP: {} | POW: {} | SIZ: {} | EDU: {}\n❤️ HP: {} | 🧠 Sanity: {} | 💪 DB: {}",
        npc.name,
        c.strength,
        c.dexterity,
        c.intelligence,
        c.constitution,
        c.appearance,
        c.power,
        c.size,
        c.education,
        npc.hit_points,
        npc.sanity,
        damage_bonus
    );
    if !npc.skills.is_empty() {
        let skills: Vec<String> = npc
            .skills
            .iter()
            .map(|(name, value)| format!("{}: {}%", name, value))
            .collect();
        output.push_str(&format!("\nSkills: {}", skills.join(", ")));
    }
    if !npc.weapons.is_empty() {
        let weapons: Vec<String> = npc
            .weapons
            .iter()
            .map(|w| format!("{} ({})", w.name, w.damage))
            .collect();
        output.push_str(&format!("\nWeapons: {}", weapons.join(", ")));
    }
    output
}

/// What players see when the Keeper reveals an NPC
pub fn public_view(npc: &Npc) -> String {
    format!(
        "👤 **{}**\n{}",
        npc.name,
        npc.description.as_deref().unwrap_or("A mysterious individual...")
    )
}

/// Full stat block and private notes, for the Keeper only
pub fn keeper_view(npc: &Npc) -> String {
    let c = &npc.characteristics;
    let damage_bonus = damage_bonus_and_build(c.strength, c.size).damage_bonus;
    let mut output = format!("🔒 **Keeper Notes - {}**\n", npc.name);
    output.push_str(&format!(
        "**Characteristics**\nSTR: {} | DEX: {} | INT: {} | CON: {}\nAPP: {} | POW: {} | SIZ: {} | EDU: {}\n",
        c.strength,
        c.dexterity,
        c.intelligence,
        c.constitution,
        c.appearance,
        c.power,
        c.size,
        c.education
    ));
    output.push_str(&format!(
        "**Derived Attributes**\n❤️ HP: {} | 🧠 Sanity: {} | 💪 DB: {}",
        npc.hit_points, npc.sanity, damage_bonus
    ));
    if !npc.skills.is_empty() {
        let skills: Vec<String> = npc
            .skills
            .iter()
            .map(|(name, value)| format!("{}: {}%", name, value))
            .collect();
        output.push_str(&format!("\n**All Skills**\n{}", skills.join(", ")));
    }
    if let Some(notes) = &npc.private_notes {
        output.push_str(&format!("\n**Private Notes**\n{}", notes));
    }
    output
}

/// Parse the Keeper form's `STR, DEX, INT, CON, APP, POW, SIZ, EDU` line
pub fn parse_characteristic_list(input: &str) -> Result<Characteristics, NpcError> {
    let values: Vec<i32> = input
        .split(',')
        .map(|s| s.trim().parse::<i32>())
        .collect::<Result<_, _>>()
        .map_err(|_| {
            NpcError::InvalidStats("Characteristics must be 8 comma-separated numbers".to_string())
        })?;
    if values.len() != Characteristic::ALL.len() {
        return Err(NpcError::InvalidStats(
            "Characteristics must be 8 comma-separated numbers".to_string(),
        ));
    }

    let mut characteristics = Characteristics::uniform(0);
    for (characteristic, value) in Characteristic::ALL.into_iter().zip(values) {
        characteristics.set(characteristic, value);
    }
    Ok(characteristics)
}

/// Parse `name:value, name:value`. Malformed or out-of-range entries are skipped.
pub fn parse_skill_list(input: &str) -> BTreeMap<String, i32> {
    normalize_skills(input.split(',').filter_map(|pair| {
        let (name, value) = pair.split_once(':')?;
        let value = value.trim().parse::<i32>().ok()?;
        Some((name.to_string(), value))
    }))
}

/// Lowercase names and keep only values in 0..=100
fn normalize_skills(skills: impl IntoIterator<Item = (String, i32)>) -> BTreeMap<String, i32> {
    skills
        .into_iter()
        .filter(|(_, value)| SKILL_RANGE.contains(value))
        .map(|(name, value)| (name.trim().to_lowercase(), value))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

#[async_trait]
pub trait NpcService: Send + Sync {
    async fn create_npc(&self, request: CreateNpcRequest) -> Result<Npc, NpcError>;

    async fn get_npc(&self, guild_id: &GuildId, name: &str) -> Result<Option<Npc>, NpcError>;

    /// NPCs in a guild, newest first
    async fn list_npcs(&self, guild_id: &GuildId) -> Result<Vec<Npc>, NpcError>;

    /// Roll against a characteristic or skill of a named NPC
    async fn npc_roll(
        &self,
        guild_id: &GuildId,
        name: &str,
        target: &str,
        difficulty: Difficulty,
        description: Option<String>,
    ) -> Result<NpcRollOutcome, NpcError>;
}

pub struct NpcServiceImpl {
    repository: Arc<dyn NpcRepositoryPort>,
    dice: Arc<dyn DiceSource>,
}

impl NpcServiceImpl {
    pub fn new(repository: Arc<dyn NpcRepositoryPort>, dice: Arc<dyn DiceSource>) -> Self {
        Self { repository, dice }
    }

    fn build_npc(&self, request: &CreateNpcRequest) -> Result<Npc, NpcError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(NpcError::InvalidStats("NPC name cannot be empty".to_string()));
        }

        let npc = match &request.stats {
            NpcStats::Template(template) => {
                let characteristics = template
                    .characteristics()
                    .unwrap_or_else(|| roll_characteristics(self.dice.as_ref()));
                Npc::new(
                    request.guild_id.clone(),
                    name,
                    characteristics,
                    request.created_by.clone(),
                )
                .with_skills(template.skills())
                .with_weapons(template.weapons())
            }
            NpcStats::Custom {
                characteristics,
                skills,
            } => {
                if let Some((characteristic, value)) = characteristics
                    .iter()
                    .find(|(_, value)| !CHARACTERISTIC_RANGE.contains(value))
                {
                    return Err(NpcError::InvalidStats(format!(
                        "{} must be between 1 and 100, got {}",
                        characteristic, value
                    )));
                }
                Npc::new(
                    request.guild_id.clone(),
                    name,
                    *characteristics,
                    request.created_by.clone(),
                )
                .with_skills(normalize_skills(skills.clone()))
            }
        };

        let npc = match request.description.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => npc.with_description(d),
            _ => npc,
        };
        let npc = match request.private_notes.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => npc.with_private_notes(n),
            _ => npc,
        };
        Ok(npc)
    }
}

#[async_trait]
impl NpcService for NpcServiceImpl {
    #[instrument(skip(self, request), fields(guild_id = %request.guild_id, name = %request.name))]
    async fn create_npc(&self, request: CreateNpcRequest) -> Result<Npc, NpcError> {
        let npc = self.build_npc(&request)?;

        if self
            .repository
            .get_by_name(&npc.guild_id, &npc.name)
            .await?
            .is_some()
        {
            return Err(NpcError::AlreadyExists(npc.name));
        }

        match self.repository.create(&npc).await {
            Ok(()) => {}
            Err(RepositoryError::Conflict(_)) => return Err(NpcError::AlreadyExists(npc.name)),
            Err(e) => return Err(e.into()),
        }

        info!(npc_id = %npc.id, hit_points = npc.hit_points, "Created NPC: {}", npc.name);
        Ok(npc)
    }

    #[instrument(skip(self), fields(guild_id = %guild_id))]
    async fn get_npc(&self, guild_id: &GuildId, name: &str) -> Result<Option<Npc>, NpcError> {
        debug!("Fetching NPC");
        Ok(self.repository.get_by_name(guild_id, name).await?)
    }

    #[instrument(skip(self), fields(guild_id = %guild_id))]
    async fn list_npcs(&self, guild_id: &GuildId) -> Result<Vec<Npc>, NpcError> {
        debug!("Listing NPCs");
        Ok(self.repository.list(guild_id).await?)
    }

    #[instrument(skip(self, description), fields(guild_id = %guild_id))]
    async fn npc_roll(
        &self,
        guild_id: &GuildId,
        name: &str,
        target: &str,
        difficulty: Difficulty,
        description: Option<String>,
    ) -> Result<NpcRollOutcome, NpcError> {
        let npc = self
            .repository
            .get_by_name(guild_id, name)
            .await?
            .ok_or_else(|| NpcError::NotFound(name.to_string()))?;

        let found = npc.find_target(target).ok_or_else(|| NpcError::TargetNotFound {
            npc: npc.name.clone(),
            query: target.to_string(),
        })?;

        let result = resolve_with_difficulty(found.value(), difficulty, self.dice.as_ref());
        debug!(npc = %npc.name, target = %found.label(), roll = result.roll, tier = %result.tier(), "NPC roll");

        Ok(NpcRollOutcome {
            npc: npc.name.clone(),
            target: found.label(),
            base: found.value(),
            difficulty,
            description,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockNpcRepositoryPort;
    use crate::domain::services::testing::ScriptedDice;
    use crate::domain::value_objects::SuccessTier;
    use crate::infrastructure::persistence::InMemoryNpcRepository;

    fn service(dice: &[u32]) -> NpcServiceImpl {
        NpcServiceImpl::new(
            Arc::new(InMemoryNpcRepository::new()),
            Arc::new(ScriptedDice::new(dice)),
        )
    }

    fn template_request(name: &str, template: NpcTemplate) -> CreateNpcRequest {
        CreateNpcRequest {
            guild_id: GuildId::new("guild"),
            name: name.to_string(),
            stats: NpcStats::Template(template),
            description: None,
            private_notes: None,
            created_by: UserId::new("keeper"),
        }
    }

    #[test]
    fn test_parse_characteristic_list() {
        let c = parse_characteristic_list("50, 60, 55, 60, 50, 70, 65, 40").unwrap();
        assert_eq!(c, NpcTemplate::Cultist.characteristics().unwrap());
        assert!(parse_characteristic_list("50, 60").is_err());
        assert!(parse_characteristic_list("50, 60, 55, 60, 50, 70, 65, lots").is_err());
    }

    #[test]
    fn test_parse_skill_list_skips_bad_entries() {
        let skills = parse_skill_list("Spot Hidden: 50, listen:120, occult, dodge:x, Stealth :30");
        assert_eq!(skills.len(), 2);
        assert_eq!(skills["spot hidden"], 50);
        assert_eq!(skills["stealth"], 30);
        assert!(parse_skill_list("").is_empty());
    }

    #[tokio::test]
    async fn test_create_from_template() {
        let service = service(&[]);
        let npc = service
            .create_npc(template_request("Brother Ezekiel", NpcTemplate::Cultist))
            .await
            .unwrap();
        assert_eq!(npc.hit_points, 12);
        assert_eq!(npc.sanity, 70);
        assert_eq!(npc.weapons[0].name, "Knife");
        assert!(stat_block(&npc).contains("❤️ HP: 12 | 🧠 Sanity: 70 | 💪 DB: 0"));
    }

    #[tokio::test]
    async fn test_custom_template_rolls_characteristics() {
        let faces = [1; 24];
        let service = service(&faces);
        let npc = service
            .create_npc(template_request("Stranger", NpcTemplate::Custom))
            .await
            .unwrap();
        assert_eq!(npc.characteristics, Characteristics::uniform(15));
        assert!(npc.skills.is_empty());
        assert_eq!(npc.hit_points, 3);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_case_insensitive() {
        let service = service(&[]);
        service
            .create_npc(template_request("Brother Ezekiel", NpcTemplate::Cultist))
            .await
            .unwrap();
        let result = service
            .create_npc(template_request("brother ezekiel", NpcTemplate::Monster))
            .await;
        assert!(matches!(result, Err(NpcError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_custom_stats_are_validated() {
        let service = service(&[]);
        let mut request = template_request("Odd", NpcTemplate::Cultist);
        request.stats = NpcStats::Custom {
            characteristics: Characteristics {
                size: 0,
                ..Characteristics::uniform(50)
            },
            skills: BTreeMap::new(),
        };
        assert!(matches!(
            service.create_npc(request).await,
            Err(NpcError::InvalidStats(_))
        ));
    }

    #[tokio::test]
    async fn test_custom_skills_are_lowercased_and_filtered() {
        let service = service(&[]);
        let mut request = template_request("Professor Armitage", NpcTemplate::Cultist);
        request.stats = NpcStats::Custom {
            characteristics: Characteristics::uniform(60),
            skills: BTreeMap::from([
                ("Library Use".to_string(), 80),
                ("Occult".to_string(), 101),
            ]),
        };
        request.private_notes = Some("Knows about the Dunwich horror".to_string());
        let npc = service.create_npc(request).await.unwrap();
        assert_eq!(npc.skills, BTreeMap::from([("library use".to_string(), 80)]));
        assert_eq!(npc.private_notes.as_deref(), Some("Knows about the Dunwich horror"));
        assert!(!stat_block(&npc).contains("Dunwich"));
    }

    #[tokio::test]
    async fn test_public_and_keeper_views() {
        let service = service(&[]);
        let mut request = template_request("Brother Ezekiel", NpcTemplate::Cultist);
        request.private_notes = Some("Serves the Black Goat".to_string());
        let npc = service.create_npc(request).await.unwrap();

        assert_eq!(public_view(&npc), "👤 **Brother Ezekiel**\nA mysterious individual...");
        assert_eq!(
            keeper_view(&npc),
            "🔒 **Keeper Notes - Brother Ezekiel**\n\
             **Characteristics**\n\
             STR: 50 | DEX: 60 | INT: 55 | CON: 60\n\
             APP: 50 | POW: 70 | SIZ: 65 | EDU: 40\n\
             **Derived Attributes**\n\
             ❤️ HP: 12 | 🧠 Sanity: 70 | 💪 DB: 0\n\
             **All Skills**\n\
             dodge: 30%, fighting (brawl): 50%, firearms (handgun): 40%, listen: 50%, \
             occult: 60%, psychology: 35%, spot hidden: 45%\n\
             **Private Notes**\n\
             Serves the Black Goat"
        );

        let found = service
            .get_npc(&GuildId::new("guild"), "brother ezekiel")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, npc.id);
        assert!(service
            .get_npc(&GuildId::new("guild"), "Nobody")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_is_per_guild_and_newest_first() {
        let service = service(&[]);
        service
            .create_npc(template_request("abigail", NpcTemplate::Cultist))
            .await
            .unwrap();
        service
            .create_npc(template_request("Zadok", NpcTemplate::Investigator))
            .await
            .unwrap();
        let mut elsewhere = template_request("Other", NpcTemplate::Monster);
        elsewhere.guild_id = GuildId::new("elsewhere");
        service.create_npc(elsewhere).await.unwrap();

        let names: Vec<String> = service
            .list_npcs(&GuildId::new("guild"))
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(names, vec!["Zadok".to_string(), "abigail".to_string()]);
    }

    #[tokio::test]
    async fn test_npc_roll_on_characteristic_and_skill() {
        let service = service(&[30, 10]);
        service
            .create_npc(template_request("Brother Ezekiel", NpcTemplate::Cultist))
            .await
            .unwrap();
        let guild = GuildId::new("guild");

        let outcome = service
            .npc_roll(&guild, "BROTHER EZEKIEL", "pow", Difficulty::Hard, None)
            .await
            .unwrap();
        assert_eq!(outcome.target, "POW");
        assert_eq!(outcome.result.target, 35);
        assert_eq!(outcome.result.tier(), SuccessTier::Success);
        assert_eq!(
            outcome.display(),
            "🎲 **Brother Ezekiel - POW (Hard)**\n**Target:** 35% | **Rolled:** 30\n\n✅ **SUCCESS!**"
        );

        let outcome = service
            .npc_roll(
                &guild,
                "brother ezekiel",
                "Occult",
                Difficulty::Normal,
                Some("Reads the tome".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(outcome.base, 60);
        assert_eq!(outcome.result.tier(), SuccessTier::ExtremeSuccess);
        assert!(outcome.display().contains("*Reads the tome*\n\n"));
    }

    #[tokio::test]
    async fn test_npc_roll_errors() {
        let service = service(&[]);
        service
            .create_npc(template_request("Brother Ezekiel", NpcTemplate::Cultist))
            .await
            .unwrap();
        let guild = GuildId::new("guild");

        assert!(matches!(
            service.npc_roll(&guild, "Nobody", "pow", Difficulty::Normal, None).await,
            Err(NpcError::NotFound(_))
        ));
        assert!(matches!(
            service
                .npc_roll(&guild, "Brother Ezekiel", "astronomy", Difficulty::Normal, None)
                .await,
            Err(NpcError::TargetNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let mut repository = MockNpcRepositoryPort::new();
        repository
            .expect_list()
            .returning(|_| Err(RepositoryError::Database("no such table: npcs".to_string())));
        let service = NpcServiceImpl::new(Arc::new(repository), Arc::new(ScriptedDice::new(&[])));
        assert!(matches!(
            service.list_npcs(&GuildId::new("guild")).await,
            Err(NpcError::Repository(_))
        ));
    }
}
