//! Error types for authentication and token operations.
//!
//! Display strings here are stable and safe to show to clients; anything
//! internal travels in fields that are not part of the message.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid phone number format")]
    InvalidPhoneFormat { phone: String },

    #[error("Please wait {retry_after_seconds} seconds before requesting a new code")]
    RateLimited { retry_after_seconds: i64 },

    #[error("Verification code is required")]
    MissingCode,

    #[error("Terms of service must be accepted")]
    TermsNotAccepted,

    #[error("Phone number is not registered")]
    NotRegistered,

    #[error("Verification code is incorrect")]
    WrongCode,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Phone number is already registered")]
    DuplicatePhone,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token signing secret must not be empty")]
    InvalidSecret,
}
