//! Category deletion page and endpoint.
//!
//! A category can only be deleted once no item belongs to it. Until then the
//! confirmation page lists the items that block the deletion.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, CategoryId, delete_category, get_category, get_items_in_category},
    endpoints,
    html::{BUTTON_DELETE_STYLE, FORM_CONTAINER_STYLE, base, link},
    item::ItemSummary,
    navigation::NavBar,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the delete confirmation page, or the items that must be removed first.
///
/// Redirects to the category list if the category does not exist.
pub async fn get_delete_category_page(
    Path(category_id): Path<CategoryId>,
    State(state): State<DeleteCategoryState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let Some(category) = get_category(category_id, &connection)? else {
        return Ok(Redirect::to(endpoints::CATEGORIES_VIEW).into_response());
    };
    let items = get_items_in_category(category_id, &connection)?;

    Ok(delete_category_view(&category, &items).into_response())
}

/// Delete a category if no items belong to it.
///
/// If items still belong to the category, nothing is deleted and the
/// confirmation page is shown again listing those items.
pub async fn delete_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<DeleteCategoryState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let Some(category) = get_category(category_id, &connection)? else {
        return Ok(Redirect::to(endpoints::CATEGORIES_VIEW).into_response());
    };
    let items = get_items_in_category(category_id, &connection)?;

    if !items.is_empty() {
        tracing::info!(
            "Refusing to delete category {category_id}, it still has {} item(s)",
            items.len()
        );
        return Ok(delete_category_view(&category, &items).into_response());
    }

    delete_category(category_id, &connection)?;

    tracing::info!("Deleted category {category_id}");

    Ok(Redirect::to(endpoints::CATEGORIES_VIEW).into_response())
}

fn delete_category_view(category: &Category, items: &[ItemSummary]) -> Markup {
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_CATEGORY_VIEW, category.id);
    let nav_bar = NavBar::new(&delete_url).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4"
            {
                "Delete Category: " (link(&endpoints::category_url(category.id), &category.name))
            }

            @if items.is_empty() {
                p class="mb-4" { "Do you really want to delete this category?" }

                form method="post" action=(delete_url) class="w-full"
                {
                    button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
                }
            } @else {
                p class="mb-4"
                {
                    "Delete the following items, or remove them from this category, \
                    before deleting the category:"
                }

                ul class="list-disc ml-6 space-y-2" data-blocking-items="true"
                {
                    @for item in items {
                        li
                        {
                            (link(&endpoints::item_url(item.id), &item.name))
                            p class="text-sm text-gray-600 dark:text-gray-400" { (item.description) }
                        }
                    }
                }
            }
        }
    };

    base("Delete Category", &content)
}
