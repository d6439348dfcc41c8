//! In-memory `UserRepository` with store-like identifier assignment.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

const ID_PREFIX: [u8; 4] = [0x65, 0xf1, 0xc0, 0xde];

/// Process-local user store.
///
/// Identifiers are assigned in insertion order and never reused. A repository
/// built with [`InMemoryUserRepository::failing`] rejects every call with the
/// given error.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicU64,
    failure: Option<UserPersistenceError>,
}

impl InMemoryUserRepository {
    /// Repository that fails every operation with `failure`.
    pub fn failing(failure: UserPersistenceError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no users are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self) -> Result<(), UserPersistenceError> {
        self.failure.clone().map_or(Ok(()), Err)
    }

    fn assign_id(&self) -> UserId {
        let sequence = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut bytes = [0_u8; UserId::LENGTH];
        bytes[..ID_PREFIX.len()].copy_from_slice(&ID_PREFIX);
        bytes[ID_PREFIX.len()..].copy_from_slice(&sequence.to_be_bytes());
        UserId::from_bytes(bytes)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        self.check()?;
        let stored = User::new(self.assign_id(), user.clone());
        self.lock().push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.check()?;
        Ok(self.lock().clone())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserPersistenceError> {
        self.check()?;
        Ok(self.lock().iter().find(|user| user.name() == name).cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        self.check()?;
        let mut users = self.lock();
        let before = users.len();
        users.retain(|user| user.id() != id);
        Ok(users.len() < before)
    }

    async fn ping(&self) -> Result<(), UserPersistenceError> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn identifiers_are_unique_and_hex() {
        let repo = InMemoryUserRepository::default();
        let first = repo.insert(&NewUser::new("A", "a@x.com")).await.expect("insert");
        let second = repo.insert(&NewUser::new("B", "b@x.com")).await.expect("insert");

        assert_ne!(first.id(), second.id());
        assert_eq!(first.id().to_string(), "65f1c0de0000000000000001");
        assert_eq!(repo.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_record_was_removed() {
        let repo = InMemoryUserRepository::default();
        let user = repo.insert(&NewUser::new("A", "a@x.com")).await.expect("insert");

        assert!(repo.delete(user.id()).await.expect("delete"));
        assert!(!repo.delete(user.id()).await.expect("delete"));
        assert!(repo.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn failing_repository_rejects_every_call() {
        let repo = InMemoryUserRepository::failing(UserPersistenceError::connection("down"));

        assert!(repo.list().await.is_err());
        assert!(repo.ping().await.is_err());
    }
}
