//! Shared utilities and common types for the SEPM server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Phone number validation

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, JwtConfig, ServerConfig, StorageBackend,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::phone;
