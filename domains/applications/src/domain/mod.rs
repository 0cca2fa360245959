//! Domain layer for the Applications domain

pub mod authorization;
pub mod entities;
pub mod state;
