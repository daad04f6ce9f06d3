//! Defines the page to display when a route or an entity cannot be found.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A 404 page with a short description of what is missing.
pub struct NotFoundError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for NotFoundError<'_> {
    fn default() -> Self {
        Self {
            description: "Something's missing.",
            fix: "Sorry, we can't find that page. You'll find lots to explore on the home page.",
        }
    }
}

impl NotFoundError<'_> {
    pub fn into_html(self) -> Html<String> {
        Html(error_view("Not Found", "404", self.description, self.fix).into_string())
    }
}

impl IntoResponse for NotFoundError<'_> {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, self.into_html()).into_response()
    }
}

/// Fallback route handler for paths that do not match any route.
pub async fn get_404_not_found() -> Response {
    NotFoundError::default().into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{
        not_found::get_404_not_found,
        test_utils::{assert_content_type, assert_valid_html, parse_html_document},
    };

    #[tokio::test]
    async fn renders_404_page() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_content_type(&response, "text/html; charset=utf-8");
        assert_valid_html(&parse_html_document(response).await);
    }
}
