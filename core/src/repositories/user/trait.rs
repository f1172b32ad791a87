//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Phone number uniqueness must be enforced by the store itself (a unique
/// index or an equivalent single critical section), never by a prior read.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by phone number
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user owns this phone number
    /// * `Err(DomainError)` - Storage error
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Errors
    /// * `AuthError::DuplicatePhone` - Another user already owns the phone number
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Number of users stored for a phone number; at most 1
    async fn count_by_phone(&self, phone_number: &str) -> Result<u64, DomainError>;
}
