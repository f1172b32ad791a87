use actix_web::{web, HttpResponse};

use sepm_core::repositories::{UserRepository, VerificationCodeRepository};
use sepm_core::services::verification::CodeNotifier;
use sepm_shared::utils::mask_phone_number;

use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/auth/register
///
/// Returns 201 when a user was created and 200 when the phone number was
/// already registered.
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "13800138000", "verificationCode": "123456", "agreeToTerms": true }
/// ```
pub async fn register<U, C, N>(
    state: web::Data<AppState<U, C, N>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    let request = request.into_inner();

    log::info!(
        "Processing registration request for phone: {}",
        mask_phone_number(&request.phone_number)
    );

    match state
        .auth_service
        .register(
            &request.phone_number,
            &request.verification_code,
            request.agree_to_terms,
        )
        .await
    {
        Ok(result) if result.created => {
            HttpResponse::Created().json(RegisterResponse::from(result))
        }
        Ok(result) => HttpResponse::Ok().json(RegisterResponse::from(result)),
        Err(error) => handle_domain_error(error),
    }
}
