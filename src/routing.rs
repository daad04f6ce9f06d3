//! Application router configuration.

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_category_page, get_delete_category_page, get_new_category_page,
        get_update_category_page, update_category_endpoint,
    },
    endpoints,
    home::get_home_page,
    internal_server_error::get_internal_server_error_page,
    item::{
        create_item_endpoint, delete_item_endpoint, get_delete_item_page, get_item_page,
        get_items_page, get_new_item_page, get_update_item_page, update_item_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
///
/// Each form posts back to the URL of the page that displays it.
pub fn build_router(state: AppState) -> Router {
    let item_routes = Router::new()
        .route(endpoints::ITEMS_VIEW, get(get_items_page))
        .route(
            endpoints::NEW_ITEM_VIEW,
            get(get_new_item_page).post(create_item_endpoint),
        )
        .route(endpoints::ITEM_VIEW, get(get_item_page))
        .route(
            endpoints::UPDATE_ITEM_VIEW,
            get(get_update_item_page).post(update_item_endpoint),
        )
        .route(
            endpoints::DELETE_ITEM_VIEW,
            get(get_delete_item_page).post(delete_item_endpoint),
        );

    let category_routes = Router::new()
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(
            endpoints::NEW_CATEGORY_VIEW,
            get(get_new_category_page).post(create_category_endpoint),
        )
        .route(endpoints::CATEGORY_VIEW, get(get_category_page))
        .route(
            endpoints::UPDATE_CATEGORY_VIEW,
            get(get_update_category_page).post(update_category_endpoint),
        )
        .route(
            endpoints::DELETE_CATEGORY_VIEW,
            get(get_delete_category_page).post(delete_category_endpoint),
        );

    Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .merge(item_routes)
        .merge(category_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
