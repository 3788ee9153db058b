use serde::Deserialize;

use crate::domain::value_objects::{CharacteristicMethod, Characteristics};

#[derive(Debug, Deserialize)]
pub struct CreateInvestigatorRequestDto {
    pub name: String,
    pub occupation: String,
    pub age: u32,
    #[serde(default)]
    pub method: CharacteristicMethod,
    /// Only read for the manual method
    #[serde(default)]
    pub characteristics: Option<Characteristics>,
}

#[derive(Debug, Deserialize)]
pub struct SetValueRequestDto {
    pub value: i32,
}

#[derive(Debug, Deserialize)]
pub struct ConditionRequestDto {
    pub condition: String,
}
