//! Two-level product taxonomy: categories and their sub-categories.

pub mod draft;
pub mod model;
pub mod query;

pub use draft::{CategoryDraft, SubCategoryDraft};
pub use model::{Category, SubCategory};
pub use query::{CategoryPage, CategoryQuery};
