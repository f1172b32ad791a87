//! Mapping of domain errors to HTTP responses

use actix_web::{
    error::JsonPayloadError,
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};

use sepm_core::errors::{AuthError, DomainError};
use sepm_shared::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidPhoneFormat { .. }
            | AuthError::MissingCode
            | AuthError::TermsNotAccepted
            | AuthError::WrongCode => StatusCode::BAD_REQUEST,
            AuthError::NotRegistered => StatusCode::NOT_FOUND,
            AuthError::CodeExpired => StatusCode::GONE,
            AuthError::DuplicatePhone => StatusCode::CONFLICT,
            AuthError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        },
        DomainError::StorageUnavailable { .. }
        | DomainError::Internal { .. }
        | DomainError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let status = status_for(&error);

    match &error {
        DomainError::StorageUnavailable { message } | DomainError::Internal { message } => {
            log::error!("Domain Error: {} ({})", error.error_code(), message);
        }
        DomainError::Token(token_error) => {
            log::error!("Token Error: {:?}", token_error);
        }
        DomainError::Auth(_) => {
            log::debug!("Auth rejected: {}", error.error_code());
        }
    }

    let response = ErrorResponse::new(error.error_code(), error.to_string());
    let response = match &error {
        DomainError::Auth(AuthError::NotRegistered) => response.add_detail("needRegister", true),
        DomainError::Auth(AuthError::RateLimited {
            retry_after_seconds,
        }) => response.add_detail("retryAfter", retry_after_seconds),
        _ => response,
    };

    let mut builder = HttpResponse::build(status);
    if let DomainError::Auth(AuthError::RateLimited {
        retry_after_seconds,
    }) = &error
    {
        builder.insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()));
    }
    builder.json(response)
}

/// Malformed JSON bodies become a 400 in the same envelope as domain errors
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {}", err);
    let response = ErrorResponse::new(error_codes::BAD_REQUEST, "Malformed request body")
        .to_response(StatusCode::BAD_REQUEST);
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .to_response(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(DomainError, StatusCode)> = vec![
            (
                AuthError::InvalidPhoneFormat { phone: "x".into() }.into(),
                StatusCode::BAD_REQUEST,
            ),
            (AuthError::MissingCode.into(), StatusCode::BAD_REQUEST),
            (AuthError::TermsNotAccepted.into(), StatusCode::BAD_REQUEST),
            (AuthError::WrongCode.into(), StatusCode::BAD_REQUEST),
            (AuthError::NotRegistered.into(), StatusCode::NOT_FOUND),
            (AuthError::CodeExpired.into(), StatusCode::GONE),
            (AuthError::DuplicatePhone.into(), StatusCode::CONFLICT),
            (
                AuthError::RateLimited {
                    retry_after_seconds: 30,
                }
                .into(),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                DomainError::storage("db down"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(status_for(&error), expected, "{:?}", error);
        }
    }

    #[actix_web::test]
    async fn test_storage_error_hides_internals() {
        let response = handle_domain_error(DomainError::storage("10.0.0.5:3306 refused"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("STORAGE_UNAVAILABLE"));
        assert!(!text.contains("10.0.0.5"));
    }

    #[actix_web::test]
    async fn test_rate_limited_sets_retry_after() {
        let response = handle_domain_error(
            AuthError::RateLimited {
                retry_after_seconds: 42,
            }
            .into(),
        );
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            "42"
        );
    }

    #[actix_web::test]
    async fn test_not_registered_flags_need_register() {
        let response = handle_domain_error(AuthError::NotRegistered.into());
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "NOT_REGISTERED");
        assert_eq!(json["details"]["needRegister"], true);
    }
}
