//! Test doubles shared by unit and integration tests.
//!
//! Compiled for `cfg(test)` and for the `test-support` feature so the
//! `tests/` integration suites can exercise the HTTP surface without a
//! running document store.

mod users;

pub use users::InMemoryUserRepository;
