//! File-backed backend.

pub mod store;

pub use store::FileStore;
