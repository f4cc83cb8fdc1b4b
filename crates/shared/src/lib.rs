//! Shared errors and configuration for Obra.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types with HTTP status mapping
//! - Configuration management (files + `OBRA__` env vars)

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
