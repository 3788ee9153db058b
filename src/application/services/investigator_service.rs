//! Investigator Service - Character sheet use cases
//!
//! Creation runs the derived attribute calculators once. Every later update
//! loads the whole record, changes one value and saves it back.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{InvestigatorRepositoryPort, RepositoryError};
use crate::domain::entities::{Backstory, Investigator};
use crate::domain::services::{roll_characteristics, DiceSource};
use crate::domain::value_objects::{CharacteristicMethod, Characteristics, UserId};

#[derive(Debug, thiserror::Error)]
pub enum InvestigatorError {
    #[error("User {0} already has an investigator")]
    AlreadyExists(UserId),
    #[error("No investigator found for user {0}")]
    NotFound(UserId),
    #[error("Invalid request: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Request to create a new investigator
#[derive(Debug, Clone)]
pub struct CreateInvestigatorRequest {
    pub user_id: UserId,
    pub name: String,
    pub occupation: String,
    pub age: u32,
    pub method: CharacteristicMethod,
    /// Only read for `Manual`
    pub characteristics: Option<Characteristics>,
}

#[async_trait]
pub trait InvestigatorService: Send + Sync {
    /// Create an investigator, failing if the user already has one
    async fn create_investigator(
        &self,
        request: CreateInvestigatorRequest,
    ) -> Result<Investigator, InvestigatorError>;

    /// Get the user's investigator as stored
    async fn get_investigator(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Investigator>, InvestigatorError>;

    async fn update_skill(
        &self,
        user_id: &UserId,
        skill: &str,
        value: i32,
    ) -> Result<Investigator, InvestigatorError>;

    async fn update_sanity(
        &self,
        user_id: &UserId,
        current: i32,
    ) -> Result<Investigator, InvestigatorError>;

    async fn update_luck(
        &self,
        user_id: &UserId,
        current: i32,
    ) -> Result<Investigator, InvestigatorError>;

    async fn add_condition(
        &self,
        user_id: &UserId,
        condition: &str,
    ) -> Result<Investigator, InvestigatorError>;

    async fn remove_condition(
        &self,
        user_id: &UserId,
        condition: &str,
    ) -> Result<Investigator, InvestigatorError>;

    async fn update_backstory(
        &self,
        user_id: &UserId,
        backstory: Backstory,
    ) -> Result<Investigator, InvestigatorError>;
}

pub struct InvestigatorServiceImpl {
    repository: Arc<dyn InvestigatorRepositoryPort>,
    dice: Arc<dyn DiceSource>,
}

impl InvestigatorServiceImpl {
    pub fn new(repository: Arc<dyn InvestigatorRepositoryPort>, dice: Arc<dyn DiceSource>) -> Self {
        Self { repository, dice }
    }

    fn validate_create_request(request: &CreateInvestigatorRequest) -> Result<(), InvestigatorError> {
        if request.name.trim().is_empty() {
            return Err(InvestigatorError::InvalidInput(
                "Investigator name cannot be empty".to_string(),
            ));
        }
        if request.name.len() > 255 {
            return Err(InvestigatorError::InvalidInput(
                "Investigator name cannot exceed 255 characters".to_string(),
            ));
        }
        Ok(())
    }

    fn characteristics_for(&self, request: &CreateInvestigatorRequest) -> Characteristics {
        match request.method {
            CharacteristicMethod::Roll => roll_characteristics(self.dice.as_ref()),
            CharacteristicMethod::PointBuy => Characteristics::point_buy(),
            CharacteristicMethod::Manual => request
                .characteristics
                .unwrap_or_else(Characteristics::manual_default),
        }
    }

    /// Load, change and save one record
    async fn modify<F>(&self, user_id: &UserId, change: F) -> Result<Investigator, InvestigatorError>
    where
        F: FnOnce(&mut Investigator) + Send,
    {
        let mut investigator = self
            .repository
            .get(user_id)
            .await?
            .ok_or_else(|| InvestigatorError::NotFound(user_id.clone()))?;

        change(&mut investigator);
        self.repository.save(&investigator).await?;
        Ok(investigator)
    }
}

#[async_trait]
impl InvestigatorService for InvestigatorServiceImpl {
    #[instrument(skip(self, request), fields(user_id = %request.user_id, method = ?request.method))]
    async fn create_investigator(
        &self,
        request: CreateInvestigatorRequest,
    ) -> Result<Investigator, InvestigatorError> {
        Self::validate_create_request(&request)?;

        if self.repository.get(&request.user_id).await?.is_some() {
            return Err(InvestigatorError::AlreadyExists(request.user_id));
        }

        let characteristics = self.characteristics_for(&request);
        let investigator = Investigator::new(
            request.user_id.clone(),
            request.name.trim(),
            request.occupation.trim(),
            request.age,
            characteristics,
        );

        match self.repository.create(&investigator).await {
            Ok(()) => {}
            Err(RepositoryError::Conflict(_)) => {
                return Err(InvestigatorError::AlreadyExists(request.user_id));
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            hit_points = investigator.hit_points.maximum,
            sanity = investigator.sanity.current,
            damage_bonus = %investigator.damage_bonus,
            "Created investigator: {}",
            investigator.name
        );
        Ok(investigator)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn get_investigator(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Investigator>, InvestigatorError> {
        debug!("Fetching investigator");
        Ok(self.repository.get(user_id).await?)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn update_skill(
        &self,
        user_id: &UserId,
        skill: &str,
        value: i32,
    ) -> Result<Investigator, InvestigatorError> {
        let investigator = self.modify(user_id, |i| i.set_skill(skill, value)).await?;
        info!(skill = %skill.to_lowercase(), value, "Updated skill");
        Ok(investigator)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn update_sanity(
        &self,
        user_id: &UserId,
        current: i32,
    ) -> Result<Investigator, InvestigatorError> {
        let investigator = self.modify(user_id, |i| i.set_sanity(current)).await?;
        info!(sanity = investigator.sanity.current, "Updated sanity");
        Ok(investigator)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn update_luck(
        &self,
        user_id: &UserId,
        current: i32,
    ) -> Result<Investigator, InvestigatorError> {
        let investigator = self.modify(user_id, |i| i.set_luck(current)).await?;
        info!(luck = investigator.luck.current, "Updated luck");
        Ok(investigator)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn add_condition(
        &self,
        user_id: &UserId,
        condition: &str,
    ) -> Result<Investigator, InvestigatorError> {
        let investigator = self
            .modify(user_id, |i| {
                i.add_condition(condition);
            })
            .await?;
        info!(condition, "Added condition");
        Ok(investigator)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn remove_condition(
        &self,
        user_id: &UserId,
        condition: &str,
    ) -> Result<Investigator, InvestigatorError> {
        let investigator = self
            .modify(user_id, |i| {
                i.remove_condition(condition);
            })
            .await?;
        info!(condition, "Removed condition");
        Ok(investigator)
    }

    #[instrument(skip(self, backstory), fields(user_id = %user_id))]
    async fn update_backstory(
        &self,
        user_id: &UserId,
        backstory: Backstory,
    ) -> Result<Investigator, InvestigatorError> {
        let investigator = self.modify(user_id, |i| i.set_backstory(backstory)).await?;
        info!("Updated backstory");
        Ok(investigator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockInvestigatorRepositoryPort;
    use crate::domain::services::testing::ScriptedDice;
    use crate::infrastructure::persistence::InMemoryInvestigatorRepository;

    fn service_with(dice: &[u32]) -> InvestigatorServiceImpl {
        InvestigatorServiceImpl::new(
            Arc::new(InMemoryInvestigatorRepository::new()),
            Arc::new(ScriptedDice::new(dice)),
        )
    }

    fn request(user: &str, method: CharacteristicMethod) -> CreateInvestigatorRequest {
        CreateInvestigatorRequest {
            user_id: UserId::new(user),
            name: "Harvey Walters".to_string(),
            occupation: "Journalist".to_string(),
            age: 42,
            method,
            characteristics: None,
        }
    }

    #[test]
    fn test_create_request_validation() {
        let mut req = request("1", CharacteristicMethod::PointBuy);
        assert!(InvestigatorServiceImpl::validate_create_request(&req).is_ok());
        req.name = "   ".to_string();
        assert!(matches!(
            InvestigatorServiceImpl::validate_create_request(&req),
            Err(InvestigatorError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_create_point_buy_and_read_back() {
        let service = service_with(&[]);
        let created = service
            .create_investigator(request("1", CharacteristicMethod::PointBuy))
            .await
            .unwrap();
        assert_eq!(created.characteristics.education, 70);
        assert_eq!(created.hit_points.maximum, 10);
        assert_eq!(created.skills["language (own)"], 70);
        assert_eq!(created.skills["dodge"], 25);

        let fetched = service.get_investigator(&UserId::new("1")).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_create_rolls_three_d6_times_five() {
        let faces = [3, 3, 3, 4, 4, 4, 2, 2, 2, 5, 5, 5, 1, 1, 1, 6, 6, 6, 3, 4, 5, 2, 3, 4];
        let service = service_with(&faces);
        let created = service
            .create_investigator(request("1", CharacteristicMethod::Roll))
            .await
            .unwrap();
        assert_eq!(created.characteristics.strength, 45);
        assert_eq!(created.characteristics.dexterity, 60);
        assert_eq!(created.characteristics.power, 90);
        assert_eq!(created.sanity.current, 90);
        assert_eq!(created.characteristics.education, 45);
    }

    #[tokio::test]
    async fn test_manual_without_characteristics_uses_fifty() {
        let service = service_with(&[]);
        let created = service
            .create_investigator(request("1", CharacteristicMethod::Manual))
            .await
            .unwrap();
        assert_eq!(created.characteristics, Characteristics::uniform(50));
    }

    #[tokio::test]
    async fn test_create_twice_is_already_exists() {
        let service = service_with(&[]);
        service
            .create_investigator(request("1", CharacteristicMethod::PointBuy))
            .await
            .unwrap();
        let second = service
            .create_investigator(request("1", CharacteristicMethod::PointBuy))
            .await;
        assert!(matches!(second, Err(InvestigatorError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let service = service_with(&[]);
        assert_eq!(service.get_investigator(&UserId::new("nobody")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_updates_on_missing_record_are_not_found() {
        let service = service_with(&[]);
        let user = UserId::new("nobody");
        assert!(matches!(
            service.update_skill(&user, "listen", 50).await,
            Err(InvestigatorError::NotFound(_))
        ));
        assert!(matches!(
            service.update_sanity(&user, 10).await,
            Err(InvestigatorError::NotFound(_))
        ));
        assert!(matches!(
            service.add_condition(&user, "Shaken").await,
            Err(InvestigatorError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_updates_persist() {
        let service = service_with(&[]);
        let user = UserId::new("1");
        service
            .create_investigator(request("1", CharacteristicMethod::PointBuy))
            .await
            .unwrap();

        service.update_skill(&user, "Spot Hidden", 65).await.unwrap();
        service.update_sanity(&user, -3).await.unwrap();
        service.update_luck(&user, 35).await.unwrap();
        service.add_condition(&user, "Shaken").await.unwrap();
        service.add_condition(&user, "Shaken").await.unwrap();
        service
            .update_backstory(
                &user,
                Backstory {
                    traits: "Stubborn".to_string(),
                    ..Backstory::default()
                },
            )
            .await
            .unwrap();

        let stored = service.get_investigator(&user).await.unwrap().unwrap();
        assert_eq!(stored.skills["spot hidden"], 65);
        assert_eq!(stored.sanity.current, 0);
        assert_eq!(stored.luck.current, 35);
        assert_eq!(stored.conditions, vec!["Shaken".to_string()]);
        assert_eq!(stored.backstory.traits, "Stubborn");
        // Derived values are never recomputed
        assert_eq!(stored.hit_points.maximum, 10);

        service.remove_condition(&user, "Shaken").await.unwrap();
        service.remove_condition(&user, "Shaken").await.unwrap();
        let stored = service.get_investigator(&user).await.unwrap().unwrap();
        assert!(stored.conditions.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_updates_last_write_wins() {
        let service = Arc::new(service_with(&[]));
        let user = UserId::new("1");
        service
            .create_investigator(request("1", CharacteristicMethod::PointBuy))
            .await
            .unwrap();

        let a = {
            let service = service.clone();
            let user = user.clone();
            tokio::spawn(async move { service.update_skill(&user, "listen", 60).await })
        };
        let b = {
            let service = service.clone();
            let user = user.clone();
            tokio::spawn(async move { service.update_skill(&user, "occult", 40).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        // Each writer saved a whole record; at least one of the edits survives
        let stored = service.get_investigator(&user).await.unwrap().unwrap();
        let listen = stored.skills["listen"] == 60;
        let occult = stored.skills["occult"] == 40;
        assert!(listen || occult);
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let mut repository = MockInvestigatorRepositoryPort::new();
        repository
            .expect_get()
            .returning(|_| Err(RepositoryError::Database("disk I/O error".to_string())));
        let service =
            InvestigatorServiceImpl::new(Arc::new(repository), Arc::new(ScriptedDice::new(&[])));

        let result = service.get_investigator(&UserId::new("1")).await;
        assert!(matches!(
            result,
            Err(InvestigatorError::Repository(RepositoryError::Database(_)))
        ));
    }

    #[tokio::test]
    async fn test_storage_conflict_maps_to_already_exists() {
        let mut repository = MockInvestigatorRepositoryPort::new();
        repository.expect_get().returning(|_| Ok(None));
        repository
            .expect_create()
            .returning(|_| Err(RepositoryError::Conflict("investigators.user_id".to_string())));
        let service =
            InvestigatorServiceImpl::new(Arc::new(repository), Arc::new(ScriptedDice::new(&[])));

        let result = service
            .create_investigator(request("1", CharacteristicMethod::PointBuy))
            .await;
        assert!(matches!(result, Err(InvestigatorError::AlreadyExists(_))));
    }
}
