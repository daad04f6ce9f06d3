//! Core item domain types and form validation.

use serde::Deserialize;

use crate::{
    category::CategoryId,
    database_id::DatabaseId,
    validation::{
        EscapedText, InvalidForm, Price, TextRule, ValidationErrors, validate_amount,
        validate_price,
    },
};

/// Database identifier for an item.
pub type ItemId = DatabaseId;

/// A category that an item belongs to, as shown on the item's pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: EscapedText,
}

/// A single item in the catalog along with its categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: EscapedText,
    pub description: EscapedText,
    pub price: Price,
    pub amount: u32,
    pub categories: Vec<CategoryRef>,
}

/// A row in the item list: the item's name and the names of its categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListing {
    pub id: ItemId,
    pub name: EscapedText,
    pub categories: Vec<EscapedText>,
}

/// The short form of an item shown on a category's pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub id: ItemId,
    pub name: EscapedText,
    pub description: EscapedText,
}

/// The validated fields of an item, excluding its categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    /// The name of the item.
    pub name: EscapedText,
    /// A description of the item.
    pub description: EscapedText,
    /// The unit price.
    pub price: Price,
    /// How many units are in stock.
    pub amount: u32,
}

/// Form data for item creation and editing.
///
/// `category` holds one entry per checked category box, so it is empty when
/// no box is checked.
#[derive(Debug, Default, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Option<String>,
    pub amount: Option<String>,
    #[serde(default)]
    pub category: Vec<String>,
}

/// The sanitized text of a submitted item form, used to fill the form again
/// when the submission is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFormValues {
    pub name: EscapedText,
    pub description: EscapedText,
    pub price: String,
    pub amount: String,
    pub category: Vec<EscapedText>,
}

impl ItemFormValues {
    /// Whether the category with `category_id` was among the submitted categories.
    pub fn has_category(&self, category_id: CategoryId) -> bool {
        let category_id = category_id.to_string();

        self.category
            .iter()
            .any(|submitted| submitted.as_str() == category_id)
    }
}

impl From<&Item> for ItemFormValues {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            amount: item.amount.to_string(),
            category: item
                .categories
                .iter()
                .map(|category| EscapedText::new_unchecked(&category.id.to_string()))
                .collect(),
        }
    }
}

/// A submitted item form that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidItemForm {
    pub item: NewItem,
    pub category_ids: Vec<CategoryId>,
}

pub const ITEM_NAME_RULE: TextRule = TextRule {
    min_length: 1,
    max_length: None,
    message: "Name must not be empty.",
};

pub const ITEM_DESCRIPTION_RULE: TextRule = TextRule {
    min_length: 1,
    max_length: None,
    message: "Description must not be empty.",
};

pub const INVALID_CATEGORY_ID: &str = "Invalid category ID";

/// Escape each submitted category value and parse it as a category ID.
///
/// Duplicate IDs are dropped, keeping the first occurrence. A value that is
/// not an integer is recorded as an error.
pub fn normalize_category_ids(
    raw: &[String],
    errors: &mut ValidationErrors,
) -> (Vec<EscapedText>, Vec<CategoryId>) {
    let escaped = raw
        .iter()
        .map(|value| EscapedText::sanitize(value))
        .collect::<Vec<_>>();

    let mut category_ids = Vec::with_capacity(escaped.len());
    let mut has_invalid_id = false;

    for value in &escaped {
        match value.as_str().parse::<CategoryId>() {
            Ok(id) if !category_ids.contains(&id) => category_ids.push(id),
            Ok(_) => {}
            Err(_) => has_invalid_id = true,
        }
    }

    if has_invalid_id {
        errors.push("category", INVALID_CATEGORY_ID);
    }

    (escaped, category_ids)
}

/// Sanitize and check a submitted item form.
///
/// # Errors
///
/// Returns an [InvalidForm] holding the sanitized values and every violated
/// rule if any field is invalid.
pub fn validate_item_form(form: &ItemForm) -> Result<ValidItemForm, InvalidForm<ItemFormValues>> {
    let mut errors = ValidationErrors::default();

    let name = ITEM_NAME_RULE.apply("name", &form.name, &mut errors);
    let description = ITEM_DESCRIPTION_RULE.apply("description", &form.description, &mut errors);
    let (price_text, price) = validate_price("price", form.price.as_deref(), &mut errors);
    let amount = validate_amount("amount", form.amount.as_deref(), &mut errors);
    let (category, category_ids) = normalize_category_ids(&form.category, &mut errors);

    match (price, amount) {
        (Some(price), Some(amount)) if errors.is_empty() => Ok(ValidItemForm {
            item: NewItem {
                name,
                description,
                price,
                amount,
            },
            category_ids,
        }),
        _ => Err(InvalidForm {
            values: ItemFormValues {
                name,
                description,
                price: price_text,
                amount: form.amount.clone().unwrap_or_default(),
                category,
            },
            errors,
        }),
    }
}
