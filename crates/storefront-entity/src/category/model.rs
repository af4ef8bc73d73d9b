//! Category entity models as returned by the store API.

use serde::{Deserialize, Serialize};

/// A top-level product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier.
    pub uuid: String,
    /// Display name.
    pub name: String,
    /// Free-form description (may be empty).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Nested sub-categories.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sub_categories: Vec<SubCategory>,
}

impl Category {
    /// Number of sub-categories nested in this category.
    pub fn sub_category_count(&self) -> usize {
        self.sub_categories.len()
    }
}

/// A sub-category nested under exactly one [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    /// Identifier; absent until the server has stored it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Display name.
    pub name: String,
    /// Free-form description (may be empty).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
