//! MySQL repository implementations

mod user_repository_impl;
mod verification_code_repository_impl;

pub use user_repository_impl::MySqlUserRepository;
pub use verification_code_repository_impl::MySqlVerificationCodeRepository;

use sepm_core::errors::DomainError;

/// Connection-level failures are transient from the caller's point of view
pub(crate) fn storage_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, context, "Database operation failed");
    DomainError::storage(format!("{}: {}", context, e))
}

/// A row came back in a shape we cannot map
pub(crate) fn decode_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::internal(format!("Failed to get {}: {}", column, e))
}
