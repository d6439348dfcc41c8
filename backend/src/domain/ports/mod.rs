//! Domain ports.
//!
//! Driving ports (`UsersCommand`, `UsersQuery`) are what inbound adapters
//! call; the driven port (`UserRepository`) is what outbound adapters
//! implement.

mod macros;
mod user_repository;
mod users_command;
mod users_query;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;
