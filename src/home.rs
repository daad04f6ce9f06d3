//! The home page with a summary of the catalog.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::count_categories,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, link},
    item::count_items,
    navigation::NavBar,
};

/// The state needed for the home page.
#[derive(Debug, Clone)]
pub struct HomePageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for HomePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the number of items and categories in the catalog.
pub async fn get_home_page(State(state): State<HomePageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let item_count = count_items(&connection)?;
    let category_count = count_categories(&connection)?;

    Ok(home_view(item_count, category_count).into_response())
}

fn home_view(item_count: i64, category_count: i64) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-2xl space-y-4"
            {
                h1 class="text-2xl font-bold" { "Candy Shop" }
                p { "Welcome to the Candy Shop inventory." }

                h2 class="text-lg font-semibold" { "The shop has the following record counts:" }

                ul class="list-disc ml-6"
                {
                    li data-item-count="true"
                    {
                        (link(endpoints::ITEMS_VIEW, "Items")) ": " (item_count)
                    }
                    li data-category-count="true"
                    {
                        (link(endpoints::CATEGORIES_VIEW, "Categories")) ": " (category_count)
                    }
                }
            }
        }
    );

    base("Home", &content)
}
