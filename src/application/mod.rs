//! Application layer - Use cases over the domain
//!
//! Services load records through the outbound repository ports, apply domain
//! rules and hand back outcomes carrying their chat display strings.

pub mod dto;
pub mod ports;
pub mod services;
