//! Storage layer - connection pool, schema bootstrap and mail stores
//!
//! # Design Principles
//!
//! - One pool, created at startup and shared through `AppState`
//! - Every store operation runs in its own transaction
//! - Handlers only see the `MailStore` trait, never a backend

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryMailStore;
pub use pool::DatabaseConfig;
pub use postgres::PgMailStore;
pub use store::{MailStore, StoreError};
