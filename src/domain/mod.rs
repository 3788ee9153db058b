//! Domain layer - Core rules with no I/O
//!
//! This layer contains:
//! - Entities: Investigator, Npc
//! - Value Objects: dice specifications and results, characteristics, derived pools
//! - Domain Services: notation parsing, roll evaluation, skill resolution,
//!   derived attribute calculation and display formatting

pub mod entities;
pub mod services;
pub mod value_objects;
