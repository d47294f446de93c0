//! mailctl-server: HTTP CRUD service for mail records
//!
//! Validates JSON request bodies, passes them to a [`db::MailStore`] and
//! renders results or a uniform `{"status": "error", ...}` envelope.

pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use error::{Error, Result};
pub use http::{build_router, run_server, AppState, ServerConfig};
