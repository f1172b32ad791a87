//! Shared wiring for the HTTP tests: in-memory stores, a console notifier
//! and a manual clock driving both the code store and the service.

use std::sync::Arc;

use actix_web::web;
use chrono::Utc;

use sepm_api::app::build_auth_service;
use sepm_api::routes::auth::AppState;
use sepm_core::domain::ManualClock;
use sepm_core::repositories::{
    InMemoryUserRepository, InMemoryVerificationCodeRepository, VerificationCodeRepository,
};
use sepm_core::services::auth::AuthServiceConfig;
use sepm_infra::sms::ConsoleNotifier;
use sepm_shared::config::JwtConfig;

pub type TestState =
    AppState<InMemoryUserRepository, InMemoryVerificationCodeRepository, ConsoleNotifier>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<InMemoryUserRepository>,
    pub codes: Arc<InMemoryVerificationCodeRepository>,
    pub notifier: Arc<ConsoleNotifier>,
    pub clock: ManualClock,
}

impl TestContext {
    pub fn new() -> Self {
        let clock = ManualClock::new(Utc::now());
        let users = Arc::new(InMemoryUserRepository::new());
        let codes = Arc::new(InMemoryVerificationCodeRepository::with_clock(Arc::new(
            clock.clone(),
        )));
        let notifier = Arc::new(ConsoleNotifier::new());

        let auth_service = build_auth_service(
            users.clone(),
            codes.clone(),
            notifier.clone(),
            &JwtConfig::new("api-test-secret"),
            AuthServiceConfig::default(),
        )
        .expect("auth service should build")
        .with_clock(Arc::new(clock.clone()));

        Self {
            state: web::Data::new(AppState::new(Arc::new(auth_service))),
            users,
            codes,
            notifier,
            clock,
        }
    }

    /// The code currently live for `phone`, read straight from the store
    pub async fn live_code(&self, phone: &str) -> String {
        self.codes
            .peek_active(phone)
            .await
            .unwrap()
            .expect("a live code should exist")
            .code
    }
}
