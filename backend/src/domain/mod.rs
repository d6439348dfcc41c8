//! Domain primitives, ports and use-cases.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failures.
//! - `User`, `NewUser`, `UserId`: the single entity and its identifier.
//! - `UsersService`: implementation of the user driving ports.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, User, UserId, UserIdError};
pub use self::users_service::UsersService;
