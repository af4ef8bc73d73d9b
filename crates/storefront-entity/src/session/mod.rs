//! Session entities: the persisted record, its lifecycle states and events.

pub mod event;
pub mod model;
pub mod state;

pub use event::SessionEvent;
pub use model::{Identity, LoginGrant, Session, TokenPair};
pub use state::SessionState;
