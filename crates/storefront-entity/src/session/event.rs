//! Session lifecycle notifications for UI collaborators.

use serde::{Deserialize, Serialize};

/// Events broadcast by the session manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A login succeeded and a session was persisted.
    LoggedIn {
        /// The store that signed in.
        user_id: String,
    },
    /// The user logged out explicitly.
    LoggedOut,
    /// Tokens were rotated in place.
    Refreshed,
    /// A refresh failed and the session was force-cleared.
    SessionExpired {
        /// Why the refresh failed.
        reason: String,
    },
}

impl SessionEvent {
    /// Whether the event ends the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::LoggedOut | Self::SessionExpired { .. })
    }
}
