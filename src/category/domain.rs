//! Core category domain types and form validation.

use serde::Deserialize;

use crate::{
    database_id::DatabaseId,
    validation::{EscapedText, InvalidForm, TextRule, ValidationErrors},
};

/// Database identifier for a category.
pub type CategoryId = DatabaseId;

/// A group of items in the catalog (e.g., 'Chocolate', 'Gummies').
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The name shown in lists, badges and checkbox labels.
    pub name: EscapedText,
    /// A short description of the category.
    pub description: EscapedText,
}

/// The sanitized fields of a category that has not been saved yet.
///
/// This is also used to pre-fill the category form when a submission is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCategory {
    /// The name of the category.
    pub name: EscapedText,
    /// A short description of the category.
    pub description: EscapedText,
}

impl From<Category> for NewCategory {
    fn from(category: Category) -> Self {
        Self {
            name: category.name,
            description: category.description,
        }
    }
}

/// Form data for category creation and editing.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub const CATEGORY_NAME_RULE: TextRule = TextRule {
    min_length: 3,
    max_length: Some(100),
    message: "Category name must be between 3 and 100 characters",
};

pub const CATEGORY_DESCRIPTION_RULE: TextRule = TextRule {
    min_length: 3,
    max_length: Some(300),
    message: "Description must be between 3 and 300 characters",
};

/// Sanitize and check a submitted category form.
///
/// # Errors
///
/// Returns an [InvalidForm] holding the sanitized values and every violated
/// rule if any field is invalid.
pub fn validate_category_form(form: &CategoryForm) -> Result<NewCategory, InvalidForm<NewCategory>> {
    let mut errors = ValidationErrors::default();

    let values = NewCategory {
        name: CATEGORY_NAME_RULE.apply("name", &form.name, &mut errors),
        description: CATEGORY_DESCRIPTION_RULE.apply("description", &form.description, &mut errors),
    };

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(InvalidForm { values, errors })
    }
}
