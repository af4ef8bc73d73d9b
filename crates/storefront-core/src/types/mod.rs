//! Shared value types.

pub mod pagination;

pub use pagination::{PageItem, PageRequest, page_count, page_window};
