//! User entity representing a registered phone number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered user.
///
/// Users are created once at registration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Phone number, unique across all users
    pub phone_number: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(phone_number: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_number,
            created_at: Utc::now(),
        }
    }
}
