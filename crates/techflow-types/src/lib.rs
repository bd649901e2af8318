//! TechFlow Types - Plain data types for the catalog service
//!
//! This crate contains only pure data types with no async runtime
//! dependencies. The server core and the view/API boundary communicate
//! exclusively through these records.

pub mod account;
pub mod service;
pub mod session;

pub use account::AdminAccount;
pub use service::{NewService, Service, ServiceFields, ServiceRecord, ValidationError, DEFAULT_ICON};
pub use session::Session;
