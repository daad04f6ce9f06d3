//! Defines the app level error type and its conversion to rendered HTML pages.
use axum::response::{IntoResponse, Response};

use crate::{
    category::CategoryId, internal_server_error::InternalServerError, item::ItemId,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
///
/// Invalid form input and blocked category deletions are not errors: the
/// handlers recover from them locally by re-rendering the submitted form or
/// the confirmation page.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// No category exists with the ID given in the request path.
    #[error("category {0} could not be found")]
    CategoryNotFound(CategoryId),

    /// No item exists with the ID given in the request path.
    #[error("item {0} could not be found")]
    ItemNotFound(ItemId),

    /// A statement inside a multi-statement write failed.
    ///
    /// The transaction has been rolled back by the time the caller sees this
    /// error, so none of the writes in the sequence are visible.
    #[error("could not save changes to the database: {0}")]
    PersistenceFailure(rusqlite::Error),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError::default().into_response(),
            Error::CategoryNotFound(_) => NotFoundError {
                description: "Category not found",
                fix: "Check that the category ID is correct, or go back to the category list.",
            }
            .into_response(),
            Error::ItemNotFound(_) => NotFoundError {
                description: "Item not found",
                fix: "Check that the item ID is correct, or go back to the item list.",
            }
            .into_response(),
            Error::PersistenceFailure(error) => {
                tracing::error!("A database write failed and was rolled back: {error}");
                InternalServerError {
                    description: "Could not save your changes",
                    fix: "Nothing was saved. Try again later or check the server logs.",
                }
                .into_response()
            }
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
