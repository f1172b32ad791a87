//! In-memory user store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// User repository backed by a map keyed by phone number.
///
/// `create` checks and inserts under one write lock, which gives the same
/// guarantee as a unique index.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(phone_number).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.phone_number) {
            return Err(AuthError::DuplicatePhone.into());
        }

        users.insert(user.phone_number.clone(), user.clone());
        Ok(user)
    }

    async fn count_by_phone(&self, phone_number: &str) -> Result<u64, DomainError> {
        let users = self.users.read().await;
        Ok(u64::from(users.contains_key(phone_number)))
    }
}
