//! MongoDB persistence adapter.
//!
//! - [`StoreClient`] is the shared, verified connection pool built at startup.
//! - [`MongoUserRepository`] implements the domain `UserRepository` port.

mod connection;
mod documents;
mod filters;
mod mongo_user_repository;

pub use connection::{
    ConnectError, DEFAULT_COLLECTION, DEFAULT_DATABASE, StoreClient, StoreConfig,
};
pub use mongo_user_repository::MongoUserRepository;
