//! Session lifecycle management: persistence, state machine, and refresh.

pub mod manager;
pub mod refresher;
pub mod store;

pub use manager::SessionManager;
pub use refresher::{RefresherHandle, SessionRefresher};
pub use store::SessionStore;
