//! User directory use-cases backed by a [`UserRepository`].
//!
//! The service owns the translation from persistence failures to
//! client-facing [`Error`] values, so every handler reports store trouble
//! with the same `"<context>: <detail>"` wording.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserId};

/// Message returned when a delete matched nothing.
pub const DELETE_NOT_FOUND_MESSAGE: &str = "User Not Found";
/// Message returned when a name lookup matched nothing.
pub const LOOKUP_NOT_FOUND_MESSAGE: &str = "user not found";

const CONNECTION_CONTEXT: &str = "DB connection failed";

#[derive(Debug, Clone, Copy)]
enum Operation {
    Insert,
    List,
    Lookup,
    Delete,
    Ping,
}

impl Operation {
    const fn context(self) -> &'static str {
        match self {
            Self::Insert => "insert failed",
            Self::List | Self::Lookup => "query failed",
            Self::Delete => "deletion failed",
            Self::Ping => "health check failed",
        }
    }

    const fn decode_context(self) -> &'static str {
        match self {
            Self::List => "cursor decode failed",
            other => other.context(),
        }
    }

    fn failure(self, error: UserPersistenceError) -> Error {
        let context = match &error {
            UserPersistenceError::Connection { .. } => CONNECTION_CONTEXT,
            UserPersistenceError::Decode { .. } => self.decode_context(),
            UserPersistenceError::Query { .. } | UserPersistenceError::Timeout { .. } => {
                self.context()
            }
        };
        Error::with_context(context, error.message())
    }
}

/// Default implementation of the user driving ports.
#[derive(Clone)]
pub struct UsersService {
    repository: Arc<dyn UserRepository>,
}

impl UsersService {
    /// Build the service over a repository adapter.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UsersCommand for UsersService {
    async fn create(&self, user: NewUser) -> Result<User, Error> {
        let created = self
            .repository
            .insert(&user)
            .await
            .map_err(|err| Operation::Insert.failure(err))?;
        debug!(user_id = %created.id(), "user created");
        Ok(created)
    }

    async fn delete(&self, id: &UserId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(|err| Operation::Delete.failure(err))?;
        if !removed {
            return Err(Error::not_found(DELETE_NOT_FOUND_MESSAGE));
        }
        debug!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl UsersQuery for UsersService {
    async fn list(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list()
            .await
            .map_err(|err| Operation::List.failure(err))
    }

    async fn find_by_name(&self, name: &str) -> Result<User, Error> {
        self.repository
            .find_by_name(name)
            .await
            .map_err(|err| Operation::Lookup.failure(err))?
            .ok_or_else(|| Error::not_found(LOOKUP_NOT_FOUND_MESSAGE))
    }

    async fn ping(&self) -> Result<(), Error> {
        self.repository
            .ping()
            .await
            .map_err(|err| Operation::Ping.failure(err))
    }
}
