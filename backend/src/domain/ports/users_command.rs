//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId};

/// Use-case port for creating and deleting users.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user and return it with its assigned identifier.
    async fn create(&self, user: NewUser) -> Result<User, Error>;

    /// Remove a user.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when nothing matched.
    async fn delete(&self, id: &UserId) -> Result<(), Error>;
}
