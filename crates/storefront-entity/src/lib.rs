//! # storefront-entity
//!
//! Domain models shared by the session core, the store API client, and the
//! admin CLI.

pub mod category;
pub mod dashboard;
pub mod session;

pub use category::{Category, CategoryDraft, CategoryPage, CategoryQuery, SubCategory};
pub use dashboard::DashboardSummary;
pub use session::{Identity, LoginGrant, Session, SessionEvent, SessionState, TokenPair};
