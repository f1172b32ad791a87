//! Shared error response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (retry hints, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes returned to API clients
pub mod error_codes {
    pub const INVALID_PHONE_FORMAT: &str = "INVALID_PHONE_FORMAT";
    pub const RATE_LIMITED: &str = "RATE_LIMITED";
    pub const MISSING_CODE: &str = "MISSING_CODE";
    pub const TERMS_NOT_ACCEPTED: &str = "TERMS_NOT_ACCEPTED";
    pub const NOT_REGISTERED: &str = "NOT_REGISTERED";
    pub const WRONG_CODE: &str = "WRONG_CODE";
    pub const CODE_EXPIRED: &str = "CODE_EXPIRED";
    pub const DUPLICATE_PHONE: &str = "DUPLICATE_PHONE";
    pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}
