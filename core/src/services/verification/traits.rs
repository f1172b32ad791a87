//! Trait for delivering verification codes to the user

use async_trait::async_trait;

/// Out-of-band delivery of a verification code (SMS in production).
///
/// Delivery is fire-and-forget from the caller's perspective; an error is
/// logged and never fails the request that issued the code.
#[async_trait]
pub trait CodeNotifier: Send + Sync {
    /// Deliver `code` to `phone`; returns a provider message id
    async fn deliver(&self, phone: &str, code: &str) -> Result<String, String>;
}
