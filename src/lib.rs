//! Grocer is a web service that turns a grocery budget into a shopping list.
//!
//! A client submits a budget, a household size and a dietary preference and
//! gets back a list of grocery items with a total cost, whether the list fits
//! the budget, and a couple of pieces of savings advice. Lists can be saved and
//! retrieved per user.
//!
//! This library provides the JSON API, the list generation engine and the
//! storage backends used by the `server` binary.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod advice;
mod allocator;
mod app_state;
mod budget;
mod catalog;
mod db;
mod endpoints;
mod food_source;
mod grocery_list;
mod logging;
mod random;
mod routing;
mod stores;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, DEFAULT_DAILY_CALL_LIMIT};
pub use catalog::{Catalog, CatalogItem, Category};
pub use db::initialize as initialize_db;
pub use food_source::{EdamamClient, EdamamConfig, FoodLookup, FoodMatch};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use stores::{CallCountStore, GroceryListStore, StorageBackend, Stores};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The budget request failed validation.
    ///
    /// The string is safe to show to the client and explains which field was
    /// rejected.
    #[error("{0}")]
    InvalidBudgetRequest(String),

    /// A request to save a grocery list was missing the user ID, the items,
    /// or one of the budget fields.
    #[error("Missing required fields")]
    MissingRequiredFields,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while serializing or deserializing JSON.
    #[error("could not (de)serialize JSON: {0}")]
    JSONSerializationError(String),

    /// A call to the external food database failed.
    ///
    /// The error string should only be logged. Lookup failures never reach the
    /// client because the list falls back to the local catalog.
    #[error("food lookup failed: {0}")]
    FoodLookup(String),

    /// The grocery catalog could not be read or parsed.
    #[error("could not load the grocery catalog: {0}")]
    CatalogLoad(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

/// The JSON body sent to the client for any error response.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorMessage {
    pub(crate) message: String,
}

/// Build a response with a JSON `{"message": ...}` body.
pub(crate) fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorMessage {
            message: message.to_owned(),
        }),
    )
        .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidBudgetRequest(message) => json_error(StatusCode::BAD_REQUEST, &message),
            Error::MissingRequiredFields => {
                json_error(StatusCode::BAD_REQUEST, &Error::MissingRequiredFields.to_string())
            }
            Error::NotFound => json_error(StatusCode::NOT_FOUND, "Not found"),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong, check the server logs for more details",
                )
            }
        }
    }
}
