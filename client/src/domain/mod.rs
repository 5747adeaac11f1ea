//! Domain layer
//!
//! Entities and the ports the application layer depends on.

pub mod entities;
pub mod ports;
