//! # storefront-core
//!
//! Core crate for the Storefront admin. Contains the unified error system,
//! configuration schemas, pagination types, and the key-value storage trait
//! that session persistence is built on.
//!
//! This crate has **no** internal dependencies on other Storefront crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
