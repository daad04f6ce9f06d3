//! Item creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
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
        ItemForm, ItemFormValues, create_item, form::item_form, validate_item_form,
    },
    navigation::NavBar,
    validation::ValidationErrors,
};

/// The state needed for creating an item.
#[derive(Debug, Clone)]
pub struct CreateItemState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the item creation page with a checkbox for every category.
pub async fn get_new_item_page(State(state): State<CreateItemState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)?;

    Ok(new_item_view(
        &ItemFormValues::default(),
        &categories,
        &ValidationErrors::default(),
    )
    .into_response())
}

/// Handle item creation form submission.
pub async fn create_item_endpoint(
    State(state): State<CreateItemState>,
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
            let categories = get_all_categories(&connection)?;

            return Ok(
                new_item_view(&invalid.values, &categories, &invalid.errors).into_response(),
            );
        }
    };

    let item_id = create_item(valid.item, &valid.category_ids, &connection)?;

    tracing::info!(
        "Created item {item_id} in {} categories",
        valid.category_ids.len()
    );

    Ok(Redirect::to(&endpoints::item_url(item_id)).into_response())
}

fn new_item_view(
    values: &ItemFormValues,
    categories: &[Category],
    errors: &ValidationErrors,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_ITEM_VIEW).into_html();
    let form = item_form(
        endpoints::NEW_ITEM_VIEW,
        values,
        categories,
        errors,
        "Create Item",
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Create Item" }
            (form)
        }
    };

    base("Create Item", &content)
}

#[cfg(test)]
mod create_item_tests {
    use std::collections::HashSet;

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;

    use crate::{
        Error,
        category::{NewCategory, create_category},
        endpoints,
        item::{ItemForm, count_items, create_item_endpoint, get_item, get_new_item_page},
        test_utils::{
            assert_form_action, assert_form_error_messages, assert_form_input_with_value,
            assert_form_submit_button_with_text, assert_redirect, assert_valid_html,
            category_checkboxes, must_get_form, must_open_shared_test_db, parse_html_document,
        },
        validation::{EscapedText, PRICE_DECIMAL_PLACES, Price},
    };

    use super::CreateItemState;

    fn get_state_with_categories() -> CreateItemState {
        let state = CreateItemState {
            db_connection: must_open_shared_test_db(),
        };
        {
            let connection = state.db_connection.lock().unwrap();
            for name in ["Chocolate", "Gummies", "Hard Candies"] {
                create_category(
                    NewCategory {
                        name: EscapedText::new_unchecked(name),
                        description: EscapedText::new_unchecked("Sweet"),
                    },
                    &connection,
                )
                .unwrap();
            }
        }

        state
    }

    fn item_form(price: &str, category: &[&str]) -> Form<ItemForm> {
        Form(ItemForm {
            name: "Milk Chocolate Bar".to_owned(),
            description: "A classic milk chocolate bar".to_owned(),
            price: Some(price.to_owned()),
            amount: Some("50".to_owned()),
            category: category.iter().map(|id| id.to_string()).collect(),
        })
    }

    #[tokio::test]
    async fn page_has_unchecked_category_boxes() {
        let state = get_state_with_categories();

        let response = get_new_item_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_action(&form, endpoints::NEW_ITEM_VIEW);
        assert_form_input_with_value(&form, "name", "text", "");
        assert_form_input_with_value(&form, "price", "number", "");
        assert_form_input_with_value(&form, "amount", "number", "");
        assert_form_submit_button_with_text(&form, "Create Item");
        assert_eq!(
            category_checkboxes(&form),
            vec![
                ("1".to_owned(), false),
                ("2".to_owned(), false),
                ("3".to_owned(), false),
            ]
        );
    }

    #[tokio::test]
    async fn creates_item_and_redirects_to_it() {
        let state = get_state_with_categories();

        let response = create_item_endpoint(State(state.clone()), item_form("2.99", &["1", "3"]))
            .await
            .unwrap();

        assert_redirect(&response, "/item/1");
        let item = get_item(1, &state.db_connection.lock().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(item.price, Price::from_cents(299));
        assert_eq!(item.amount, 50);
        assert_eq!(
            item.categories
                .iter()
                .map(|category| category.id)
                .collect::<HashSet<_>>(),
            HashSet::from([1, 3])
        );
    }

    #[tokio::test]
    async fn invalid_form_keeps_submitted_boxes_checked() {
        let state = get_state_with_categories();

        let response = create_item_endpoint(State(state.clone()), item_form("12.345", &["2"]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_messages(&form, &[PRICE_DECIMAL_PLACES]);
        assert_form_input_with_value(&form, "price", "number", "12.345");
        assert_eq!(
            category_checkboxes(&form),
            vec![
                ("1".to_owned(), false),
                ("2".to_owned(), true),
                ("3".to_owned(), false),
            ]
        );
        assert_eq!(count_items(&state.db_connection.lock().unwrap()), Ok(0));
    }

    #[tokio::test]
    async fn unknown_category_is_a_persistence_failure() {
        let state = get_state_with_categories();

        let result = create_item_endpoint(State(state.clone()), item_form("1", &["42"])).await;

        assert!(matches!(result, Err(Error::PersistenceFailure(_))));
        assert_eq!(
            result.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(count_items(&state.db_connection.lock().unwrap()), Ok(0));
    }
}
