//! The endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/category/{category_id}', use
//! [format_endpoint], or [category_url] and [item_url] for the detail pages.

use crate::{category::CategoryId, item::ItemId};

/// The summary page with item and category counts.
pub const ROOT: &str = "/";
/// The page listing all items.
pub const ITEMS_VIEW: &str = "/items";
/// The page and form target for creating a new item.
pub const NEW_ITEM_VIEW: &str = "/item/create";
/// The detail page for a single item.
pub const ITEM_VIEW: &str = "/item/{item_id}";
/// The page and form target for updating an item.
pub const UPDATE_ITEM_VIEW: &str = "/item/{item_id}/update";
/// The confirmation page and form target for deleting an item.
pub const DELETE_ITEM_VIEW: &str = "/item/{item_id}/delete";
/// The page listing all categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page and form target for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/category/create";
/// The detail page for a single category and its items.
pub const CATEGORY_VIEW: &str = "/category/{category_id}";
/// The page and form target for updating a category.
pub const UPDATE_CATEGORY_VIEW: &str = "/category/{category_id}/update";
/// The confirmation page and form target for deleting a category.
pub const DELETE_CATEGORY_VIEW: &str = "/category/{category_id}/delete";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/item/{item_id}', '{item_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

/// The canonical URL of a category's detail page.
pub fn category_url(id: CategoryId) -> String {
    format_endpoint(CATEGORY_VIEW, id)
}

/// The canonical URL of an item's detail page.
pub fn item_url(id: ItemId) -> String {
    format_endpoint(ITEM_VIEW, id)
}
