//! Integration tests for the authentication flow through the public API

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::Duration;

use sepm_core::{
    AuthError, AuthService, AuthServiceConfig, CodeNotifier, DomainError,
    InMemoryUserRepository, InMemoryVerificationCodeRepository, ManualClock, TokenService,
    TokenServiceConfig, UserRepository, VerificationService,
};

#[derive(Default)]
struct InboxNotifier {
    inbox: Mutex<HashMap<String, String>>,
}

impl InboxNotifier {
    fn take(&self, phone: &str) -> Option<String> {
        self.inbox.lock().unwrap().remove(phone)
    }
}

#[async_trait]
impl CodeNotifier for InboxNotifier {
    async fn deliver(&self, phone: &str, code: &str) -> Result<String, String> {
        self.inbox
            .lock()
            .unwrap()
            .insert(phone.to_string(), code.to_string());
        Ok(format!("inbox-{}", phone))
    }
}

struct Harness {
    service: AuthService<InMemoryUserRepository, InMemoryVerificationCodeRepository, InboxNotifier>,
    users: Arc<InMemoryUserRepository>,
    notifier: Arc<InboxNotifier>,
    clock: ManualClock,
}

impl Harness {
    fn new() -> Self {
        let clock = ManualClock::default();
        let users = Arc::new(InMemoryUserRepository::new());
        let codes = Arc::new(InMemoryVerificationCodeRepository::with_clock(Arc::new(
            clock.clone(),
        )));
        let notifier = Arc::new(InboxNotifier::default());
        let verification = Arc::new(VerificationService::new(codes, notifier.clone()));
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::new("integration-secret")).unwrap());

        let service = AuthService::new(users.clone(), verification, tokens, AuthServiceConfig::default())
            .with_clock(Arc::new(clock.clone()));

        Self {
            service,
            users,
            notifier,
            clock,
        }
    }

    /// Request a code and wait for it to arrive in the inbox
    async fn receive_code(&self, phone: &str) -> String {
        self.service.request_code(phone).await.unwrap();
        tokio::time::timeout(StdDuration::from_secs(2), async {
            loop {
                if let Some(code) = self.notifier.take(phone) {
                    return code;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("code was not delivered")
    }
}

#[tokio::test]
async fn test_register_then_login_with_delivered_codes() {
    let h = Harness::new();
    let phone = "15012345678";

    let code = h.receive_code(phone).await;
    let registered = h.service.register(phone, &code, true).await.unwrap();
    assert!(registered.created);

    h.clock.advance(Duration::seconds(60));

    let code = h.receive_code(phone).await;
    let logged_in = h.service.login(phone, &code).await.unwrap();
    assert_eq!(logged_in.user_id, registered.user_id);
    assert_ne!(logged_in.token, registered.token);
}

#[tokio::test]
async fn test_login_before_register_then_register() {
    let h = Harness::new();
    let phone = "18612345678";

    let code = h.receive_code(phone).await;
    assert!(matches!(
        h.service.login(phone, &code).await,
        Err(DomainError::Auth(AuthError::NotRegistered))
    ));

    // the unused code is still good for registration
    let registered = h.service.register(phone, &code, true).await.unwrap();
    assert!(registered.created);
    assert_eq!(h.users.count_by_phone(phone).await.unwrap(), 1);
}

#[tokio::test]
async fn test_codes_are_per_phone() {
    let h = Harness::new();

    let a = h.receive_code("13800138000").await;
    let _b = h.receive_code("13900139000").await;

    assert!(h.service.register("13800138000", &a, true).await.is_ok());
    assert!(h.users.find_by_phone("13900139000").await.unwrap().is_none());
}
