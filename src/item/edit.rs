//! Item update page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, get_all_categories},
    endpoints,
    html::{FORM_CONTAINER_STYLE, base},
    item::{
        ItemForm, ItemFormValues, ItemId, form::item_form, get_item, validate_item_form,
        update_item,
    },
    navigation::NavBar,
    validation::ValidationErrors,
};

/// The state needed for the update item page and endpoint.
#[derive(Debug, Clone)]
pub struct UpdateItemState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the item update form with the item's current categories checked.
pub async fn get_update_item_page(
    Path(item_id): Path<ItemId>,
    State(state): State<UpdateItemState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let item = get_item(item_id, &connection)?.ok_or(Error::ItemNotFound(item_id))?;
    let categories = get_all_categories(&connection)?;

    Ok(update_item_view(
        item_id,
        &ItemFormValues::from(&item),
        &categories,
        &ValidationErrors::default(),
    )
    .into_response())
}

/// Handle item update form submission.
///
/// The item's categories are replaced with exactly the checked categories.
pub async fn update_item_endpoint(
    Path(item_id): Path<ItemId>,
    State(state): State<UpdateItemState>,
    Form(form): Form<ItemForm>,
) -> Result<Response, Error> {
    let validated = validate_item_form(&form);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let valid = match validated {
        Ok(valid) => valid,
        Err(invalid) => {
            if get_item(item_id, &connection)?.is_none() {
                return Err(Error::ItemNotFound(item_id));
            }

            let categories = get_all_categories(&connection)?;

            return Ok(update_item_view(
                item_id,
                &invalid.values,
                &categories,
                &invalid.errors,
            )
            .into_response());
        }
    };

    update_item(item_id, valid.item, &valid.category_ids, &connection)?;

    tracing::info!("Updated item {item_id}");

    Ok(Redirect::to(&endpoints::item_url(item_id)).into_response())
}

fn update_item_view(
    item_id: ItemId,
    values: &ItemFormValues,
    categories: &[Category],
    errors: &ValidationErrors,
) -> Markup {
    let update_url = endpoints::format_endpoint(endpoints::UPDATE_ITEM_VIEW, item_id);
    let nav_bar = NavBar::new(&update_url).into_html();
    let form = item_form(&update_url, values, categories, errors, "Update Item");

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Update Item" }
            (form)
        }
    };

    base("Update Item", &content)
}
