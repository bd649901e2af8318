//! Storage layer
//!
//! Uses SQLite (embedded) for persisted entities and DashMap (in-memory)
//! for sessions.

pub mod db;
pub mod sessions;

pub use db::Database;
pub use sessions::SessionStore;
