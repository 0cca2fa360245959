//! Shared database types for Jobboard
//!
//! This module provides common database-related types used across domain repositories.

use thiserror::Error;

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A conditional write found the stored row in a different state than expected
    #[error("Record was modified concurrently")]
    Conflict,

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
