//! In-memory verification code store

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::verification_code::{IssueOutcome, VerificationCode, VerifyOutcome};
use crate::errors::DomainError;

use super::trait_::VerificationCodeRepository;

/// Keeps the newest record per phone number behind a single mutex.
///
/// Each operation holds the lock for its whole read-modify-write, so replacing
/// and consuming are atomic.
#[derive(Clone)]
pub struct InMemoryVerificationCodeRepository {
    codes: Arc<Mutex<HashMap<String, VerificationCode>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryVerificationCodeRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    /// Number of stored records, live or not
    pub async fn len(&self) -> usize {
        self.codes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.codes.lock().await.is_empty()
    }
}

impl Default for InMemoryVerificationCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationCodeRepository for InMemoryVerificationCodeRepository {
    async fn issue(&self, phone_number: &str, ttl: Duration) -> Result<VerificationCode, DomainError> {
        let record = VerificationCode::new(phone_number.to_string(), self.clock.now(), ttl);
        let mut codes = self.codes.lock().await;
        codes.insert(phone_number.to_string(), record.clone());
        Ok(record)
    }

    async fn issue_unless_active(
        &self,
        phone_number: &str,
        ttl: Duration,
    ) -> Result<IssueOutcome, DomainError> {
        let now = self.clock.now();
        let mut codes = self.codes.lock().await;

        if let Some(live) = codes.get(phone_number).filter(|record| record.is_live_at(now)) {
            return Ok(IssueOutcome::Active(live.clone()));
        }

        let record = VerificationCode::new(phone_number.to_string(), now, ttl);
        codes.insert(phone_number.to_string(), record.clone());
        Ok(IssueOutcome::Issued(record))
    }

    async fn peek_active(&self, phone_number: &str) -> Result<Option<VerificationCode>, DomainError> {
        let now = self.clock.now();
        let codes = self.codes.lock().await;
        Ok(codes
            .get(phone_number)
            .filter(|record| record.is_live_at(now))
            .cloned())
    }

    async fn verify(&self, phone_number: &str, code: &str) -> Result<VerifyOutcome, DomainError> {
        let now = self.clock.now();
        let mut codes = self.codes.lock().await;

        let Some(record) = codes.get_mut(phone_number) else {
            return Ok(VerifyOutcome::NotFound);
        };

        let outcome = record.check(code, now);
        if outcome.is_valid() {
            record.mark_as_used();
        }
        Ok(outcome)
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let now = self.clock.now();
        let mut codes = self.codes.lock().await;
        let before = codes.len();
        codes.retain(|_, record| record.is_live_at(now));
        Ok((before - codes.len()) as u64)
    }
}
