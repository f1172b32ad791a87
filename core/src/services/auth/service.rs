//! Main authentication service implementation

use std::future::Future;
use std::sync::Arc;

use sepm_shared::utils::{is_valid_phone_number, mask_phone_number};

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::{IssueOutcome, VerifyOutcome};
use crate::domain::value_objects::{LoginResult, RegisterResult, RequestCodeResult};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{UserRepository, VerificationCodeRepository};
use crate::services::token::TokenService;
use crate::services::verification::{CodeNotifier, VerificationService};

use super::config::AuthServiceConfig;

/// Authentication service orchestrating code requests, login and registration
pub struct AuthService<U, C, N>
where
    U: UserRepository,
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Verification service for SMS code handling
    verification_service: Arc<VerificationService<C, N>>,
    /// Token service for JWT issuance
    token_service: Arc<TokenService>,
    /// Time source for cooldown reporting
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, C, N> AuthService<U, C, N>
where
    U: UserRepository,
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `verification_service` - Service for issuing and checking codes
    /// * `token_service` - Service for JWT issuance
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<C, N>>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            token_service,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Use `clock` when reporting the remaining cooldown
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Request a verification code for a phone number
    ///
    /// 1. Validates the phone number format
    /// 2. Issues a new code and hands it to the notifier, unless a previously
    ///    issued code is still live (checked in the same store operation)
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidPhoneFormat`
    /// * `AuthError::RateLimited` - a code is still live; carries the seconds left
    /// * `DomainError::StorageUnavailable`
    pub async fn request_code(&self, phone: &str) -> DomainResult<RequestCodeResult> {
        Self::validate_phone(phone)?;

        let outcome = self
            .with_timeout(
                "issue",
                self.verification_service
                    .send_code(phone, self.config.code_ttl()),
            )
            .await?;

        if let IssueOutcome::Active(record) = outcome {
            let retry_after_seconds = record
                .seconds_remaining_at(self.clock.now())
                .clamp(1, self.config.code_ttl_seconds.max(1));

            tracing::warn!(
                phone = %mask_phone_number(phone),
                retry_after_seconds,
                event = "rate_limit_exceeded",
                "Verification code request rate limit exceeded"
            );
            return Err(AuthError::RateLimited { retry_after_seconds }.into());
        }

        Ok(RequestCodeResult {
            phone_number: phone.to_string(),
            expires_in_seconds: self.config.code_ttl_seconds,
        })
    }

    /// Log in an existing user with a verification code
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidPhoneFormat` / `AuthError::MissingCode` - malformed input
    /// * `AuthError::NotRegistered` - no user owns the phone number
    /// * `AuthError::CodeExpired` - the newest code is past its window
    /// * `AuthError::WrongCode` - mismatch, or no usable code on record
    pub async fn login(&self, phone: &str, code: &str) -> DomainResult<LoginResult> {
        Self::validate_phone(phone)?;
        let code = Self::require_code(code)?;

        let user = self
            .with_timeout("find_by_phone", self.user_repository.find_by_phone(phone))
            .await?
            .ok_or_else(|| {
                tracing::info!(
                    phone = %mask_phone_number(phone),
                    event = "login_unregistered",
                    "Login attempted for unregistered phone number"
                );
                AuthError::NotRegistered
            })?;

        let outcome = self
            .with_timeout("verify", self.verification_service.verify(phone, code))
            .await?;

        match outcome {
            VerifyOutcome::Valid => {}
            VerifyOutcome::Expired => return Err(AuthError::CodeExpired.into()),
            VerifyOutcome::Incorrect | VerifyOutcome::NotFound => {
                return Err(AuthError::WrongCode.into())
            }
        }

        let token = self.token_service.issue(&user)?;

        tracing::info!(
            user_id = %user.id,
            phone = %mask_phone_number(phone),
            event = "login_succeeded",
            "User logged in"
        );

        Ok(LoginResult {
            user_id: user.id,
            phone_number: user.phone_number,
            token: token.token,
        })
    }

    /// Register a phone number, or log in if it already has an account
    ///
    /// Expired and incorrect codes both surface as `WrongCode` here.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidPhoneFormat`
    /// * `AuthError::TermsNotAccepted`
    /// * `AuthError::MissingCode`
    /// * `AuthError::WrongCode`
    pub async fn register(
        &self,
        phone: &str,
        code: &str,
        agree_to_terms: bool,
    ) -> DomainResult<RegisterResult> {
        Self::validate_phone(phone)?;
        if !agree_to_terms {
            return Err(AuthError::TermsNotAccepted.into());
        }
        let code = Self::require_code(code)?;

        let outcome = self
            .with_timeout("verify", self.verification_service.verify(phone, code))
            .await?;
        if !outcome.is_valid() {
            return Err(AuthError::WrongCode.into());
        }

        let existing = self
            .with_timeout("find_by_phone", self.user_repository.find_by_phone(phone))
            .await?;

        let (user, created) = match existing {
            Some(user) => (user, false),
            None => self.create_or_adopt(phone).await?,
        };

        let token = self.token_service.issue(&user)?;

        tracing::info!(
            user_id = %user.id,
            phone = %mask_phone_number(phone),
            created,
            event = "register_succeeded",
            "Registration completed"
        );

        Ok(RegisterResult {
            user_id: user.id,
            phone_number: user.phone_number,
            created_at: user.created_at,
            token: token.token,
            created,
        })
    }

    /// Insert a new user; if a concurrent registration won the race, return
    /// the winner instead.
    async fn create_or_adopt(&self, phone: &str) -> DomainResult<(User, bool)> {
        let user = User::new(phone.to_string());

        match self
            .with_timeout("create", self.user_repository.create(user))
            .await
        {
            Ok(user) => Ok((user, true)),
            Err(DomainError::Auth(AuthError::DuplicatePhone)) => {
                tracing::info!(
                    phone = %mask_phone_number(phone),
                    event = "register_race_lost",
                    "Concurrent registration detected, using existing user"
                );
                let winner = self
                    .with_timeout("find_by_phone", self.user_repository.find_by_phone(phone))
                    .await?
                    .ok_or_else(|| {
                        DomainError::storage("user vanished after duplicate phone conflict")
                    })?;
                Ok((winner, false))
            }
            Err(e) => Err(e),
        }
    }

    fn validate_phone(phone: &str) -> DomainResult<()> {
        if is_valid_phone_number(phone) {
            Ok(())
        } else {
            Err(AuthError::InvalidPhoneFormat {
                phone: phone.to_string(),
            }
            .into())
        }
    }

    fn require_code(code: &str) -> DomainResult<&str> {
        let code = code.trim();
        if code.is_empty() {
            Err(AuthError::MissingCode.into())
        } else {
            Ok(code)
        }
    }

    /// Bound a storage call by `config.storage_timeout`
    async fn with_timeout<T, F>(&self, operation: &'static str, fut: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        match tokio::time::timeout(self.config.storage_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_ms = self.config.storage_timeout.as_millis() as u64,
                    event = "storage_timeout",
                    "Storage call timed out"
                );
                Err(DomainError::storage(format!("{} timed out", operation)))
            }
        }
    }
}
