//! Item listing page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, link,
    },
    item::{ItemListing, get_all_items},
    navigation::NavBar,
};

/// The state needed for the item listing page.
#[derive(Debug, Clone)]
pub struct ItemsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ItemsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the list of all items with their categories.
pub async fn get_items_page(State(state): State<ItemsPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let items = get_all_items(&connection)?;

    Ok(items_view(&items).into_response())
}

fn items_view(items: &[ItemListing]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ITEMS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Candy List" }

                    a href=(endpoints::NEW_ITEM_VIEW) class=(LINK_STYLE) { "Create Item" }
                }

                @if items.is_empty() {
                    p { "There are no items." }
                } @else {
                    table class="w-full text-sm text-left rtl:text-right"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Categories" }
                            }
                        }

                        tbody
                        {
                            @for item in items {
                                tr class=(TABLE_ROW_STYLE) data-item-row="true"
                                {
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        (link(&endpoints::item_url(item.id), &item.name))
                                    }

                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        div class="flex flex-wrap gap-1"
                                        {
                                            @for category_name in &item.categories {
                                                span class=(CATEGORY_BADGE_STYLE) { (category_name) }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Candy List", &content)
}

#[cfg(test)]
mod items_page_tests {
    use axum::{extract::State, http::StatusCode};

    use crate::{
        category::{NewCategory, create_category},
        item::{NewItem, create_item, get_items_page},
        test_utils::{
            assert_valid_html, must_open_shared_test_db, parse_html_document, select_hrefs,
            select_text,
        },
        validation::{EscapedText, Price},
    };

    use super::ItemsPageState;

    fn new_item(name: &str) -> NewItem {
        NewItem {
            name: EscapedText::new_unchecked(name),
            description: EscapedText::new_unchecked("Sweet"),
            price: Price::from_cents(100),
            amount: 3,
        }
    }

    #[tokio::test]
    async fn lists_items_with_category_badges() {
        let state = ItemsPageState {
            db_connection: must_open_shared_test_db(),
        };
        {
            let connection = state.db_connection.lock().unwrap();
            let gummies = create_category(
                NewCategory {
                    name: EscapedText::new_unchecked("Gummies"),
                    description: EscapedText::new_unchecked("Chewy"),
                },
                &connection,
            )
            .unwrap();
            create_item(new_item("Sour Gummy Worms"), &[gummies.id], &connection).unwrap();
            create_item(new_item("Mystery Candy"), &[], &connection).unwrap();
        }

        let response = get_items_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(
            select_text(&html, "tr[data-item-row] td:first-child a"),
            vec!["Mystery Candy", "Sour Gummy Worms"]
        );
        assert_eq!(
            select_hrefs(&html, "tr[data-item-row] td:first-child a"),
            vec!["/item/2", "/item/1"]
        );
        assert_eq!(select_text(&html, "tr[data-item-row] span"), vec!["Gummies"]);
    }

    #[tokio::test]
    async fn shows_message_when_empty() {
        let state = ItemsPageState {
            db_connection: must_open_shared_test_db(),
        };

        let response = get_items_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert!(html.html().contains("There are no items."));
    }
}
