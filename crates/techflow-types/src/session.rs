//! Authenticated-identity marker

use serde::{Deserialize, Serialize};

/// Ephemeral identity established by a successful login.
///
/// Values are only created by the auth service, so holding one proves the
/// caller authenticated; gated catalog operations take it explicitly instead
/// of reading ambient request state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
}
