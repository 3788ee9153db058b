//! Data Transfer Objects - For API boundaries
//!
//! Request bodies and response envelopes for the HTTP command surface.

pub mod command;
pub mod encounter;
pub mod investigator;
pub mod npc;

pub use command::*;
pub use encounter::*;
pub use investigator::*;
pub use npc::*;
