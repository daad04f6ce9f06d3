//! Category update page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{
        CategoryForm, CategoryId, NewCategory, form::category_form, get_category,
        update_category, validate_category_form,
    },
    endpoints,
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    validation::ValidationErrors,
};

/// The state needed for the update category page and endpoint.
#[derive(Debug, Clone)]
pub struct UpdateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the category update form pre-filled with the category's fields.
pub async fn get_update_category_page(
    Path(category_id): Path<CategoryId>,
    State(state): State<UpdateCategoryState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = get_category(category_id, &connection)?
        .ok_or(Error::CategoryNotFound(category_id))?;

    Ok(update_category_view(
        category_id,
        &NewCategory::from(category),
        &ValidationErrors::default(),
    )
    .into_response())
}

/// Handle category update form submission.
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<UpdateCategoryState>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    if get_category(category_id, &connection)?.is_none() {
        return Err(Error::CategoryNotFound(category_id));
    }

    let category = match validate_category_form(&form) {
        Ok(category) => category,
        Err(invalid) => {
            return Ok(
                update_category_view(category_id, &invalid.values, &invalid.errors)
                    .into_response(),
            );
        }
    };

    update_category(category_id, category, &connection)?;

    Ok(Redirect::to(&endpoints::category_url(category_id)).into_response())
}

fn update_category_view(
    category_id: CategoryId,
    values: &NewCategory,
    errors: &ValidationErrors,
) -> Markup {
    let update_url = endpoints::format_endpoint(endpoints::UPDATE_CATEGORY_VIEW, category_id);
    let nav_bar = NavBar::new(&update_url).into_html();
    let form = category_form(&update_url, values, errors, "Update Category");

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Update Category" }
            (form)
        }
    };

    base("Update Category", &content)
}
