//! SQLite repositories
//!
//! Each record is stored as a JSON document next to the columns it is looked
//! up by. Primary keys make creation atomic.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;

use crate::application::ports::outbound::{
    EncounterRepositoryPort, InvestigatorRepositoryPort, NpcRepositoryPort, RepositoryError,
};
use crate::domain::entities::{name_key, Encounter, Investigator, Npc};
use crate::domain::value_objects::{GuildId, UserId};

fn database_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(db.message().to_string())
        }
        _ => RepositoryError::Database(e.to_string()),
    }
}

fn to_document<T: serde::Serialize>(value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Fixed-width UTC timestamp, so text order is time order
fn sortable_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn from_document<T: serde::de::DeserializeOwned>(document: &str) -> Result<T, RepositoryError> {
    serde_json::from_str(document).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

pub struct SqliteInvestigatorRepository {
    pool: SqlitePool,
}

impl SqliteInvestigatorRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS investigators (
                user_id TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl InvestigatorRepositoryPort for SqliteInvestigatorRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<Investigator>, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT document FROM investigators WHERE user_id = ?")
                .bind(user_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

        row.map(|(document,)| from_document(&document)).transpose()
    }

    async fn create(&self, investigator: &Investigator) -> Result<(), RepositoryError> {
        let document = to_document(investigator)?;
        sqlx::query("INSERT INTO investigators (user_id, document) VALUES (?, ?)")
            .bind(investigator.user_id.as_str())
            .bind(document)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;
        Ok(())
    }

    async fn save(&self, investigator: &Investigator) -> Result<(), RepositoryError> {
        let document = to_document(investigator)?;
        sqlx::query(
            "INSERT OR REPLACE INTO investigators (user_id, document, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
        )
        .bind(investigator.user_id.as_str())
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;
        Ok(())
    }
}

pub struct SqliteNpcRepository {
    pool: SqlitePool,
}

impl SqliteNpcRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS npcs (
                guild_id TEXT NOT NULL,
                name_key TEXT NOT NULL,
                document TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (guild_id, name_key)
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl NpcRepositoryPort for SqliteNpcRepository {
    async fn create(&self, npc: &Npc) -> Result<(), RepositoryError> {
        let document = to_document(npc)?;
        sqlx::query(
            "INSERT INTO npcs (guild_id, name_key, document, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(npc.guild_id.as_str())
        .bind(npc.name_key())
        .bind(document)
        .bind(sortable_timestamp(&npc.created_at))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;
        Ok(())
    }

    async fn get_by_name(
        &self,
        guild_id: &GuildId,
        name: &str,
    ) -> Result<Option<Npc>, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT document FROM npcs WHERE guild_id = ? AND name_key = ?")
                .bind(guild_id.as_str())
                .bind(name_key(name))
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

        row.map(|(document,)| from_document(&document)).transpose()
    }

    async fn list(&self, guild_id: &GuildId) -> Result<Vec<Npc>, RepositoryError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT document FROM npcs WHERE guild_id = ? ORDER BY created_at DESC, name_key",
        )
        .bind(guild_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter()
            .map(|(document,)| from_document(document))
            .collect()
    }
}

pub struct SqliteEncounterRepository {
    pool: SqlitePool,
}

impl SqliteEncounterRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS encounters (
                guild_id TEXT NOT NULL,
                name_key TEXT NOT NULL,
                document TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (guild_id, name_key)
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl EncounterRepositoryPort for SqliteEncounterRepository {
    async fn create(&self, encounter: &Encounter) -> Result<(), RepositoryError> {
        let document = to_document(encounter)?;
        sqlx::query(
            "INSERT INTO encounters (guild_id, name_key, document, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(encounter.guild_id.as_str())
        .bind(encounter.name_key())
        .bind(document)
        .bind(sortable_timestamp(&encounter.created_at))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;
        Ok(())
    }

    async fn get_by_name(
        &self,
        guild_id: &GuildId,
        name: &str,
    ) -> Result<Option<Encounter>, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT document FROM encounters WHERE guild_id = ? AND name_key = ?")
                .bind(guild_id.as_str())
                .bind(name_key(name))
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

        row.map(|(document,)| from_document(&document)).transpose()
    }

    async fn list(&self, guild_id: &GuildId) -> Result<Vec<Encounter>, RepositoryError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT document FROM encounters WHERE guild_id = ? ORDER BY created_at DESC, name_key",
        )
        .bind(guild_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter()
            .map(|(document,)| from_document(document))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NpcTemplate;
    use crate::domain::value_objects::Characteristics;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn pool() -> SqlitePool {
        // One connection, since every in-memory connection is its own database
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    fn cultist(guild: &str, name: &str) -> Npc {
        let template = NpcTemplate::Cultist;
        Npc::new(
            GuildId::new(guild),
            name,
            template.characteristics().unwrap(),
            UserId::new("keeper"),
        )
        .with_skills(template.skills())
        .with_private_notes("Serves the Black Goat")
    }

    #[tokio::test]
    async fn test_investigator_document_round_trip() {
        let repo = SqliteInvestigatorRepository::new(pool().await).await.unwrap();
        let mut investigator = Investigator::new(
            UserId::new("u1"),
            "Harvey Walters",
            "Journalist",
            42,
            Characteristics::point_buy(),
        );
        repo.create(&investigator).await.unwrap();
        assert!(matches!(
            repo.create(&investigator).await,
            Err(RepositoryError::Conflict(_))
        ));

        investigator.set_skill("Occult", 35);
        investigator.add_condition("Temporary Insanity");
        repo.save(&investigator).await.unwrap();

        let stored = repo.get(&UserId::new("u1")).await.unwrap().unwrap();
        assert_eq!(stored, investigator);
        assert!(repo.get(&UserId::new("u2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_npcs_are_unique_per_guild_name() {
        let repo = SqliteNpcRepository::new(pool().await).await.unwrap();
        repo.create(&cultist("g1", "Brother Ezekiel")).await.unwrap();
        repo.create(&cultist("g2", "Brother Ezekiel")).await.unwrap();
        assert!(matches!(
            repo.create(&cultist("g1", "BROTHER EZEKIEL")).await,
            Err(RepositoryError::Conflict(_))
        ));

        let found = repo
            .get_by_name(&GuildId::new("g1"), "brother ezekiel")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.private_notes.as_deref(), Some("Serves the Black Goat"));
        assert_eq!(found.skills["occult"], 60);
    }

    #[tokio::test]
    async fn test_npc_list_is_newest_first() {
        let repo = SqliteNpcRepository::new(pool().await).await.unwrap();
        let base = Utc::now();
        for (seconds, name) in [(0, "Zadok Allen"), (90, "asenath Waite"), (30, "Joseph Curwen")] {
            let mut npc = cultist("g1", name);
            npc.created_at = base + chrono::Duration::seconds(seconds);
            repo.create(&npc).await.unwrap();
        }
        let names: Vec<String> = repo
            .list(&GuildId::new("g1"))
            .await
            .unwrap()
            .into_iter()
            .map(|npc| npc.name)
            .collect();
        assert_eq!(names, vec!["asenath Waite", "Joseph Curwen", "Zadok Allen"]);
        assert_eq!(
            sortable_timestamp(&base).len(),
            sortable_timestamp(&(base + chrono::Duration::seconds(90))).len()
        );
    }

    #[tokio::test]
    async fn test_encounter_round_trip_and_order() {
        let repo = SqliteEncounterRepository::new(pool().await).await.unwrap();
        let base = Utc::now();
        let older = Encounter::new(
            GuildId::new("g1"),
            "Whispers in the Stacks",
            "Orne Library",
            "A book falls from a shelf nobody touched",
            UserId::new("keeper"),
        )
        .with_requirements("Library Use, Spot Hidden (Hard)")
        .with_private_notes("The book is the Necronomicon");
        let mut newer = Encounter::new(
            GuildId::new("g1"),
            "Dreams of the Gate",
            "Boarding house attic",
            "Angles that should not meet",
            UserId::new("keeper"),
        );
        newer.created_at = base + chrono::Duration::seconds(10);

        repo.create(&older).await.unwrap();
        repo.create(&newer).await.unwrap();
        assert!(matches!(
            repo.create(&older).await,
            Err(RepositoryError::Conflict(_))
        ));

        let stored = repo
            .get_by_name(&GuildId::new("g1"), "whispers in the stacks")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, older);

        let names: Vec<String> = repo
            .list(&GuildId::new("g1"))
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Dreams of the Gate", "Whispers in the Stacks"]);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_a_serialization_error() {
        let pool = pool().await;
        let repo = SqliteInvestigatorRepository::new(pool.clone()).await.unwrap();
        sqlx::query("INSERT INTO investigators (user_id, document) VALUES ('u1', '{not json')")
            .execute(&pool)
            .await
            .unwrap();
        assert!(matches!(
            repo.get(&UserId::new("u1")).await,
            Err(RepositoryError::Serialization(_))
        ));
    }
}
