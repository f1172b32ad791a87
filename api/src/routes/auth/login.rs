use actix_web::{web, HttpResponse};

use sepm_core::repositories::{UserRepository, VerificationCodeRepository};
use sepm_core::services::verification::CodeNotifier;
use sepm_shared::utils::mask_phone_number;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/auth/login
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "13800138000", "verificationCode": "123456" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid phone, missing or wrong code
/// - 404 Not Found: phone number not registered (`details.needRegister = true`)
/// - 410 Gone: code expired
pub async fn login<U, C, N>(
    state: web::Data<AppState<U, C, N>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    let request = request.into_inner();

    log::info!(
        "Processing login request for phone: {}",
        mask_phone_number(&request.phone_number)
    );

    match state
        .auth_service
        .login(&request.phone_number, &request.verification_code)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(LoginResponse::from(result)),
        Err(error) => handle_domain_error(error),
    }
}
