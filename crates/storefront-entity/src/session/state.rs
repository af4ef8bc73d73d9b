//! Session lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// States of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session; only the login view is reachable.
    #[default]
    Unauthenticated,
    /// A login call is in flight.
    Authenticating,
    /// A valid session exists.
    Authenticated,
    /// A valid session exists and its tokens are being refreshed.
    Refreshing,
}

impl SessionState {
    /// Whether a usable session exists in this state.
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::Authenticated | Self::Refreshing)
    }

    /// Whether `login` may start from this state.
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
            Self::Refreshing => "refreshing",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
