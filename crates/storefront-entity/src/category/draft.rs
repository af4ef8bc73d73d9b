//! Validated input for creating or updating a category.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use storefront_core::AppError;

use super::model::Category;

/// Category form data submitted by the admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CategoryDraft {
    /// Display name.
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    /// Free-form description; sent as `""` when not provided.
    #[serde(default)]
    pub description: String,
    /// Optional document reference attached to the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Optional media URL attached to the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Nested sub-categories.
    #[serde(default)]
    #[validate(nested)]
    pub sub_categories: Vec<SubCategoryDraft>,
}

/// Sub-category form data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SubCategoryDraft {
    /// Existing identifier when editing, `None` for new entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Display name.
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl CategoryDraft {
    /// Create a draft with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a new sub-category.
    #[must_use]
    pub fn with_sub_category(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.sub_categories.push(SubCategoryDraft {
            uuid: None,
            name: name.into(),
            description: description.into(),
        });
        self
    }

    /// Run the form rules, mapping failures into a validation error.
    pub fn ensure_valid(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|e| AppError::validation(format!("Invalid category: {e}")))
    }
}

impl From<Category> for CategoryDraft {
    /// Start an edit from the stored category, keeping sub-category ids.
    fn from(category: Category) -> Self {
        Self {
            name: category.name,
            description: category.description,
            document_id: None,
            media_url: None,
            sub_categories: category
                .sub_categories
                .into_iter()
                .map(|sub| SubCategoryDraft {
                    uuid: sub.uuid,
                    name: sub.name,
                    description: sub.description,
                })
                .collect(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
