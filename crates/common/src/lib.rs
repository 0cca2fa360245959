//! Shared configuration and error handling for Jobboard
//!
//! This crate provides common functionality used across the Jobboard services:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP rendering
//! - A validating JSON body extractor
//! - Repository error types shared by domain persistence layers

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{ValidatedJson, ValidatedJsonRejection};
