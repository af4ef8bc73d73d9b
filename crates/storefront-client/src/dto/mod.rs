//! Wire formats of the store API.

pub mod auth;
pub mod category;
