//! Request and response bodies for the auth endpoints.
//!
//! Missing request fields deserialize to empty values so validation errors
//! come from the service with their specific kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sepm_core::domain::value_objects::{LoginResult, RegisterResult, RequestCodeResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestCodeRequest {
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCodeResponse {
    pub message: String,
    /// Seconds until the code expires and a new one may be requested
    pub countdown: i64,
    pub phone_number: String,
}

impl From<RequestCodeResult> for RequestCodeResponse {
    fn from(result: RequestCodeResult) -> Self {
        Self {
            message: "Verification code sent".to_string(),
            countdown: result.expires_in_seconds,
            phone_number: result.phone_number,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub phone_number: String,
    pub verification_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub user_id: Uuid,
    pub phone_number: String,
    pub token: String,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            message: "Login successful".to_string(),
            user_id: result.user_id,
            phone_number: result.phone_number,
            token: result.token,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub phone_number: String,
    pub verification_code: String,
    pub agree_to_terms: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: Uuid,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub token: String,
    /// False when the phone number was already registered
    pub created: bool,
}

impl From<RegisterResult> for RegisterResponse {
    fn from(result: RegisterResult) -> Self {
        let message = if result.created {
            "Registration successful"
        } else {
            "Phone number already registered, logged in"
        };
        Self {
            message: message.to_string(),
            user_id: result.user_id,
            phone_number: result.phone_number,
            created_at: result.created_at,
            token: result.token,
            created: result.created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: RegisterRequest = serde_json::from_str(r#"{"phoneNumber":"13800138000"}"#).unwrap();
        assert_eq!(req.phone_number, "13800138000");
        assert_eq!(req.verification_code, "");
        assert!(!req.agree_to_terms);
    }

    #[test]
    fn test_response_uses_camel_case() {
        let response = RequestCodeResponse::from(RequestCodeResult {
            phone_number: "13800138000".to_string(),
            expires_in_seconds: 60,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["countdown"], 60);
        assert_eq!(json["phoneNumber"], "13800138000");
    }
}
