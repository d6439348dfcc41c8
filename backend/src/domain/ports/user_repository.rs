//! Driven port for user persistence and its error type.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The store could not be reached or a pooled connection was lost.
        Connection => "user store connection failed: {message}",
        /// The store rejected or failed to execute the operation.
        Query => "user store query failed: {message}",
        /// A stored document could not be decoded into a user.
        Decode => "user store decode failed: {message}",
        /// The operation exceeded its time budget.
        Timeout => "user store operation timed out: {message}",
    }
}

/// Store of user records.
///
/// Every method performs exactly one round trip to the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new record; the store assigns its identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Every stored record, in store order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// First record whose name matches exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Remove the record with `id`; `true` when one was removed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;

    /// Round-trip health check against the store.
    async fn ping(&self) -> Result<(), UserPersistenceError>;
}
