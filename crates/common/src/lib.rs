//! Shared utilities, configuration, and error handling for the Cloud Advisor API
//!
//! This crate provides common functionality used across the application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Request extractors with built-in validation
//! - Database pool setup and schema creation

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson, ValidatedQuery};
