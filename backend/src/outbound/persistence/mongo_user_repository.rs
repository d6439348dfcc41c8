//! MongoDB-backed implementation of the `UserRepository` port.
//!
//! Every call is one store round trip bounded by the client's
//! per-operation budget. Listing drains the cursor inside the same budget.

use std::future::IntoFuture;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::error::{Error as DriverError, ErrorKind};
use tokio::time::timeout;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::connection::StoreClient;
use super::documents::{UserDocument, object_id_from, user_id_from};
use super::filters::UserFilter;

/// User repository over the shared [`StoreClient`].
#[derive(Clone, Debug)]
pub struct MongoUserRepository {
    store: StoreClient,
}

impl MongoUserRepository {
    /// Create a repository sharing the given client pool.
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    async fn within_budget<T, F>(
        &self,
        operation: &'static str,
        fut: F,
    ) -> Result<T, UserPersistenceError>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        let budget = self.store.operation_timeout();
        match timeout(budget, fut.into_future()).await {
            Ok(result) => result.map_err(map_driver_error),
            Err(_) => {
                warn!(operation, budget = ?budget, "user store operation exceeded budget");
                Err(UserPersistenceError::timeout(format!(
                    "{operation} exceeded {}ms budget",
                    budget.as_millis()
                )))
            }
        }
    }
}

fn map_driver_error(error: DriverError) -> UserPersistenceError {
    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => UserPersistenceError::connection(error.to_string()),
        ErrorKind::BsonDeserialization(_) => UserPersistenceError::decode(error.to_string()),
        _ => UserPersistenceError::query(error.to_string()),
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let document = UserDocument::from(user);
        let inserted = self
            .within_budget("insert", self.store.users().insert_one(&document))
            .await?;
        let id = inserted.inserted_id.as_object_id().ok_or_else(|| {
            UserPersistenceError::decode(format!(
                "inserted id is not an ObjectId: {}",
                inserted.inserted_id
            ))
        })?;
        Ok(User::new(user_id_from(id), user.clone()))
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.store.users();
        let fetch = async move {
            let cursor = users.find(UserFilter::All.into_document()).await?;
            cursor.try_collect::<Vec<UserDocument>>().await
        };
        let documents = self.within_budget("list", fetch).await?;
        documents.into_iter().map(User::try_from).collect()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserPersistenceError> {
        let filter = UserFilter::ByName(name).into_document();
        let found = self
            .within_budget("find_by_name", self.store.users().find_one(filter))
            .await?;
        found.map(User::try_from).transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let filter = UserFilter::ById(object_id_from(id)).into_document();
        let outcome = self
            .within_budget("delete", self.store.users().delete_one(filter))
            .await?;
        Ok(outcome.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), UserPersistenceError> {
        self.store
            .ping()
            .await
            .map_err(|err| UserPersistenceError::connection(err.to_string()))
    }
}
