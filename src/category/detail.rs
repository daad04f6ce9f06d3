//! Category detail page listing the category's items.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, CategoryId, get_category, get_items_in_category},
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base, link},
    item::ItemSummary,
    navigation::NavBar,
};

/// The state needed for the category detail page.
#[derive(Debug, Clone)]
pub struct CategoryPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render a category and the items in it.
pub async fn get_category_page(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoryPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = get_category(category_id, &connection)?
        .ok_or(Error::CategoryNotFound(category_id))?;
    let items = get_items_in_category(category_id, &connection)?;

    Ok(category_view(&category, &items).into_response())
}

fn category_view(category: &Category, items: &[ItemSummary]) -> Markup {
    let category_url = endpoints::category_url(category.id);
    let nav_bar = NavBar::new(&category_url).into_html();
    let update_url = endpoints::format_endpoint(endpoints::UPDATE_CATEGORY_VIEW, category.id);
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_CATEGORY_VIEW, category.id);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-2xl space-y-4"
            {
                h1 class="text-xl font-bold" { "Category: " (category.name) }
                p { (category.description) }

                h2 class="text-lg font-semibold" { "Items" }

                @if items.is_empty() {
                    p { "This category does not have any items." }
                } @else {
                    dl class="space-y-2"
                    {
                        @for item in items {
                            dt data-item-name="true" { (link(&endpoints::item_url(item.id), &item.name)) }
                            dd class="ml-4 text-gray-600 dark:text-gray-400" { (item.description) }
                        }
                    }
                }

                div class="flex gap-4 pt-4"
                {
                    a href=(update_url) class=(LINK_STYLE) { "Update Category" }
                    a href=(delete_url) class=(LINK_STYLE) { "Delete Category" }
                }
            }
        }
    );

    base("Category Detail", &content)
}
