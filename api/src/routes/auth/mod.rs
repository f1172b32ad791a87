//! Authentication route handlers
//!
//! - `POST /verification-code` - request a one-time code
//! - `POST /login` - log in with a code
//! - `POST /register` - register (or log in) with a code

pub mod login;
pub mod register;
pub mod request_code;

use std::sync::Arc;

use actix_web::web;

use sepm_core::repositories::{UserRepository, VerificationCodeRepository};
use sepm_core::services::auth::AuthService;
use sepm_core::services::verification::CodeNotifier;

pub use login::login;
pub use register::register;
pub use request_code::request_code;

/// Application state that holds shared services
pub struct AppState<U, C, N>
where
    U: UserRepository,
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    pub auth_service: Arc<AuthService<U, C, N>>,
}

impl<U, C, N> AppState<U, C, N>
where
    U: UserRepository,
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    pub fn new(auth_service: Arc<AuthService<U, C, N>>) -> Self {
        Self { auth_service }
    }
}

/// Register the auth routes on a scope
pub fn configure<U, C, N>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    cfg.route("/verification-code", web::post().to(request_code::<U, C, N>))
        .route("/login", web::post().to(login::<U, C, N>))
        .route("/register", web::post().to(register::<U, C, N>));
}
