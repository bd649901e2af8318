//! Request extractors

pub mod session;

pub use session::{AdminSession, SESSION_COOKIE};
