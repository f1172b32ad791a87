//! # Infrastructure Layer
//!
//! Concrete implementations of the core repository and notifier traits.
//!
//! ## Architecture
//!
//! - **Database**: MySQL stores for users and verification codes using SQLx
//! - **SMS**: console notifier that logs codes instead of sending them
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// SMS module - verification code delivery
pub mod sms;

/// Startup failures of the infrastructure layer.
///
/// Request-time storage failures surface as `DomainError::StorageUnavailable` instead.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),
}
