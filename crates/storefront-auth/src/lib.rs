//! # storefront-auth
//!
//! Client-side session lifecycle for the Storefront admin.
//!
//! ## Modules
//!
//! - `service`: the external auth service contract (login, refresh)
//! - `session`: persisted session record, the session state machine, and
//!   the background token refresher
//! - `guard`: maps session state and current route to a navigation intent

pub mod guard;
pub mod service;
pub mod session;

pub use guard::{Navigation, RouteGuard};
pub use service::AuthService;
pub use session::{RefresherHandle, SessionManager, SessionRefresher, SessionStore};
