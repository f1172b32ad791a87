//! Results returned by the authentication service operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of requesting a verification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCodeResult {
    /// Phone number the code was issued for
    pub phone_number: String,

    /// Seconds until the code expires and a new one may be requested
    pub expires_in_seconds: i64,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    pub user_id: Uuid,
    pub phone_number: String,
    pub token: String,
}

/// Result of a successful registration.
///
/// `created` is false when the phone number already had an account; the
/// existing user is returned and no duplicate is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResult {
    pub user_id: Uuid,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub token: String,
    pub created: bool,
}
