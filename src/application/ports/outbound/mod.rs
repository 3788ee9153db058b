//! Outbound ports - Interfaces that the application requires from external systems

mod repository_port;

pub use repository_port::{
    EncounterRepositoryPort, InvestigatorRepositoryPort, NpcRepositoryPort, RepositoryError,
};

#[cfg(test)]
pub use repository_port::{
    MockEncounterRepositoryPort, MockInvestigatorRepositoryPort, MockNpcRepositoryPort,
};
