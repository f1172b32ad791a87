//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use sepm_shared::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Storage failed or did not answer in time. `message` is for logs only.
    #[error("Service temporarily unavailable")]
    StorageUnavailable { message: String },

    #[error("Internal error")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::StorageUnavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::StorageUnavailable { .. } => error_codes::STORAGE_UNAVAILABLE,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Token(_) => error_codes::INTERNAL_ERROR,
            DomainError::Auth(auth) => match auth {
                AuthError::InvalidPhoneFormat { .. } => error_codes::INVALID_PHONE_FORMAT,
                AuthError::RateLimited { .. } => error_codes::RATE_LIMITED,
                AuthError::MissingCode => error_codes::MISSING_CODE,
                AuthError::TermsNotAccepted => error_codes::TERMS_NOT_ACCEPTED,
                AuthError::NotRegistered => error_codes::NOT_REGISTERED,
                AuthError::WrongCode => error_codes::WRONG_CODE,
                AuthError::CodeExpired => error_codes::CODE_EXPIRED,
                AuthError::DuplicatePhone => error_codes::DUPLICATE_PHONE,
            },
        }
    }

    /// The wrapped auth error, if any
    pub fn as_auth(&self) -> Option<&AuthError> {
        match self {
            DomainError::Auth(auth) => Some(auth),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
