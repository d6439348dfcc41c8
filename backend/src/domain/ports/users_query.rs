//! Driving port for user reads.
//!
//! Inbound adapters use this port without importing persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Use-case port for reading users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users, unfiltered and unpaginated.
    async fn list(&self) -> Result<Vec<User>, Error>;

    /// The first user named exactly `name`.
    async fn find_by_name(&self, name: &str) -> Result<User, Error>;

    /// Check that the backing store answers.
    async fn ping(&self) -> Result<(), Error>;
}
