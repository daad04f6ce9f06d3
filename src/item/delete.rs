//! Item deletion page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_DELETE_STYLE, FORM_CONTAINER_STYLE, base, link},
    item::{Item, ItemId, delete_item, get_item},
    navigation::NavBar,
};

/// The state needed for deleting an item.
#[derive(Debug, Clone)]
pub struct DeleteItemState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the delete confirmation page, or redirect to the item list if the
/// item does not exist.
pub async fn get_delete_item_page(
    Path(item_id): Path<ItemId>,
    State(state): State<DeleteItemState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match get_item(item_id, &connection)? {
        Some(item) => Ok(delete_item_view(&item).into_response()),
        None => Ok(Redirect::to(endpoints::ITEMS_VIEW).into_response()),
    }
}

/// Delete an item and its category associations, then redirect to the item list.
pub async fn delete_item_endpoint(
    Path(item_id): Path<ItemId>,
    State(state): State<DeleteItemState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    if get_item(item_id, &connection)?.is_none() {
        return Ok(Redirect::to(endpoints::ITEMS_VIEW).into_response());
    }

    delete_item(item_id, &connection)?;

    tracing::info!("Deleted item {item_id}");

    Ok(Redirect::to(endpoints::ITEMS_VIEW).into_response())
}

fn delete_item_view(item: &Item) -> Markup {
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_ITEM_VIEW, item.id);
    let nav_bar = NavBar::new(&delete_url).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4"
            {
                "Delete Item: " (link(&endpoints::item_url(item.id), &item.name))
            }

            p class="mb-4" { "Do you really want to delete this item?" }

            form method="post" action=(delete_url) class="w-full"
            {
                button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
            }
        }
    };

    base("Delete Item", &content)
}
