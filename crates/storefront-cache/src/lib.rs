//! # storefront-cache
//!
//! Key-value stores with per-entry expiry used to persist the session
//! record. Supports two backends:
//!
//! - **file**: JSON cookie jar on disk, survives process restarts
//! - **memory**: In-process store using [moka](https://crates.io/crates/moka)
//!
//! The backend is selected at runtime based on configuration.

#[cfg(feature = "file")]
pub mod file;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::StoreManager;
