//! Inbound adapters that translate external requests into domain port calls.
//!
//! HTTP is the only transport; handlers live under [`http`].

pub mod http;
