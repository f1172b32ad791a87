use actix_web::{web, HttpResponse};

use sepm_core::repositories::{UserRepository, VerificationCodeRepository};
use sepm_core::services::verification::CodeNotifier;
use sepm_shared::utils::mask_phone_number;

use crate::dto::auth::{RequestCodeRequest, RequestCodeResponse};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/auth/verification-code
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "13800138000" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Verification code sent", "countdown": 60, "phoneNumber": "13800138000" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid phone number
/// - 429 Too Many Requests: a code is still live; `Retry-After` carries the seconds left
pub async fn request_code<U, C, N>(
    state: web::Data<AppState<U, C, N>>,
    request: web::Json<RequestCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    let phone = request.into_inner().phone_number;

    log::info!(
        "Processing verification code request for phone: {}",
        mask_phone_number(&phone)
    );

    match state.auth_service.request_code(&phone).await {
        Ok(result) => HttpResponse::Ok().json(RequestCodeResponse::from(result)),
        Err(error) => handle_domain_error(error),
    }
}
