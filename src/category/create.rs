//! Category creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{
        CategoryForm, NewCategory, create_category, form::category_form, get_category_by_name,
        validate_category_form,
    },
    endpoints,
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    validation::ValidationErrors,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the category creation page.
pub async fn get_new_category_page() -> Response {
    new_category_view(&NewCategory::default(), &ValidationErrors::default()).into_response()
}

/// Handle category creation form submission.
///
/// If a category with the submitted name already exists, the client is sent
/// to that category instead of creating a second one.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryEndpointState>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, Error> {
    let new_category = match validate_category_form(&form) {
        Ok(new_category) => new_category,
        Err(invalid) => {
            return Ok(new_category_view(&invalid.values, &invalid.errors).into_response());
        }
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    if let Some(existing) = get_category_by_name(&new_category.name, &connection)? {
        tracing::debug!(
            "category \"{}\" already exists with ID {}",
            existing.name.as_str(),
            existing.id
        );
        return Ok(Redirect::to(&endpoints::category_url(existing.id)).into_response());
    }

    let category = create_category(new_category, &connection)?;

    tracing::info!("Created category {}", category.id);

    Ok(Redirect::to(&endpoints::category_url(category.id)).into_response())
}

fn new_category_view(values: &NewCategory, errors: &ValidationErrors) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CATEGORY_VIEW).into_html();
    let form = category_form(
        endpoints::NEW_CATEGORY_VIEW,
        values,
        errors,
        "Create Category",
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Create Category" }
            (form)
        }
    };

    base("Create Category", &content)
}
