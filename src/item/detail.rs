//! Item detail page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base, link},
    item::{Item, ItemId, get_item},
    navigation::NavBar,
};

/// The state needed for the item detail page.
#[derive(Debug, Clone)]
pub struct ItemPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ItemPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render an item with its price, stock and categories.
pub async fn get_item_page(
    Path(item_id): Path<ItemId>,
    State(state): State<ItemPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let item = get_item(item_id, &connection)?.ok_or(Error::ItemNotFound(item_id))?;

    Ok(item_view(&item).into_response())
}

fn item_view(item: &Item) -> Markup {
    let item_url = endpoints::item_url(item.id);
    let nav_bar = NavBar::new(&item_url).into_html();
    let update_url = endpoints::format_endpoint(endpoints::UPDATE_ITEM_VIEW, item.id);
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_ITEM_VIEW, item.id);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-2xl space-y-4"
            {
                h1 class="text-xl font-bold" { (item.name) }

                dl class="grid grid-cols-[auto_1fr] gap-x-4 gap-y-2"
                {
                    dt class="font-semibold" { "Description" }
                    dd { (item.description) }

                    dt class="font-semibold" { "Price" }
                    dd data-item-price="true" { "$" (item.price) }

                    dt class="font-semibold" { "Amount" }
                    dd data-item-amount="true" { (item.amount) }

                    dt class="font-semibold" { "Categories" }
                    dd data-item-categories="true"
                    {
                        @if item.categories.is_empty() {
                            "None"
                        }

                        @for (index, category) in item.categories.iter().enumerate() {
                            @if index > 0 { ", " }
                            (link(&endpoints::category_url(category.id), &category.name))
                        }
                    }
                }

                div class="flex gap-4 pt-4"
                {
                    a href=(update_url) class=(LINK_STYLE) { "Update Item" }
                    a href=(delete_url) class=(LINK_STYLE) { "Delete Item" }
                }
            }
        }
    );

    base(&item.name, &content)
}

#[cfg(test)]
mod item_page_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };

    use crate::{
        Error,
        category::{NewCategory, create_category},
        item::{NewItem, create_item, get_item_page},
        test_utils::{
            assert_valid_html, must_open_shared_test_db, parse_html_document, select_hrefs,
            select_text,
        },
        validation::{EscapedText, Price},
    };

    use super::ItemPageState;

    #[tokio::test]
    async fn shows_item_fields_and_category_links() {
        let state = ItemPageState {
            db_connection: must_open_shared_test_db(),
        };
        let item_id = {
            let connection = state.db_connection.lock().unwrap();
            let chocolate = create_category(
                NewCategory {
                    name: EscapedText::new_unchecked("Chocolate"),
                    description: EscapedText::new_unchecked("desc1"),
                },
                &connection,
            )
            .unwrap();
            create_item(
                NewItem {
                    name: EscapedText::new_unchecked("Fish &amp; Chips"),
                    description: EscapedText::new_unchecked("desc2"),
                    price: Price::from_cents(290),
                    amount: 50,
                },
                &[chocolate.id],
                &connection,
            )
            .unwrap()
        };

        let response = get_item_page(Path(item_id), State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(select_text(&html, "h1"), vec!["Fish & Chips"]);
        assert_eq!(select_text(&html, "[data-item-price]"), vec!["$2.90"]);
        assert_eq!(select_text(&html, "[data-item-amount]"), vec!["50"]);
        assert_eq!(
            select_hrefs(&html, "[data-item-categories] a"),
            vec!["/category/1"]
        );
    }

    #[tokio::test]
    async fn missing_item_returns_404() {
        let state = ItemPageState {
            db_connection: must_open_shared_test_db(),
        };

        let result = get_item_page(Path(3), State(state)).await;

        assert!(matches!(result, Err(Error::ItemNotFound(3))));
        assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);
    }
}
