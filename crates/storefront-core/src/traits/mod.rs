//! Core traits defining pluggable backends.

pub mod store;

pub use store::KeyValueStore;
