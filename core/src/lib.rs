//! # SEPM Core
//!
//! Domain layer for phone number authentication: entities, repository
//! interfaces, services and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    Claims, Clock, IssuedToken, LoginResult, ManualClock, RegisterResult, RequestCodeResult,
    SystemClock, User, VerificationCode, VerifyOutcome,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{
    InMemoryUserRepository, InMemoryVerificationCodeRepository, UserRepository,
    VerificationCodeRepository,
};
pub use services::{
    AuthService, AuthServiceConfig, CodeCleanupConfig, CodeCleanupService, CodeNotifier,
    TokenService, TokenServiceConfig, VerificationService,
};
