//! Application state and factory
//!
//! Builds the authentication service from its parts and the Actix-web
//! application around it.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse};

use sepm_core::errors::DomainError;
use sepm_core::repositories::{UserRepository, VerificationCodeRepository};
use sepm_core::services::auth::{AuthService, AuthServiceConfig};
use sepm_core::services::token::TokenService;
use sepm_core::services::verification::{CodeNotifier, VerificationService};
use sepm_shared::config::JwtConfig;

use crate::config::token_config;
use crate::handlers::error::{json_error_handler, not_found};
use crate::routes::auth::{self, AppState};

/// Wire repositories, notifier and token signing into an `AuthService`
pub fn build_auth_service<U, C, N>(
    users: Arc<U>,
    codes: Arc<C>,
    notifier: Arc<N>,
    jwt: &JwtConfig,
    config: AuthServiceConfig,
) -> Result<AuthService<U, C, N>, DomainError>
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    let token_service = Arc::new(TokenService::new(token_config(jwt))?);
    let verification_service = Arc::new(VerificationService::new(codes, notifier));

    Ok(AuthService::new(
        users,
        verification_service,
        token_service,
        config,
    ))
}

/// Create and configure the application with all dependencies
pub fn create_app<U, C, N>(
    app_state: web::Data<AppState<U, C, N>>,
    cors: Cors,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Middleware order: CORS runs first, then request logging
        .wrap(Logger::default())
        .wrap(cors)
        .route("/", web::get().to(api_info))
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/auth").configure(auth::configure::<U, C, N>))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "sepm-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API overview
async fn api_info() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "SEPM Backend API",
        "endpoints": {
            "health": "/health",
            "auth": {
                "verification_code": {
                    "path": "/api/auth/verification-code",
                    "method": "POST",
                    "request_body": { "phoneNumber": "string (11 digits, 1[3-9]xxxxxxxxx)" },
                    "responses": {
                        "200": "Code issued, countdown in seconds",
                        "400": "Invalid phone format",
                        "429": "A code is still live"
                    }
                },
                "login": {
                    "path": "/api/auth/login",
                    "method": "POST",
                    "request_body": {
                        "phoneNumber": "string",
                        "verificationCode": "string (6 digits)"
                    },
                    "responses": {
                        "200": "Logged in, returns token",
                        "400": "Invalid input or wrong code",
                        "404": "Phone number not registered",
                        "410": "Code expired"
                    }
                },
                "register": {
                    "path": "/api/auth/register",
                    "method": "POST",
                    "request_body": {
                        "phoneNumber": "string",
                        "verificationCode": "string (6 digits)",
                        "agreeToTerms": "boolean"
                    },
                    "responses": {
                        "201": "User created, returns token",
                        "200": "Already registered, logged in",
                        "400": "Invalid input, terms not accepted or wrong code"
                    }
                }
            }
        }
    }))
}
