//! Defines the endpoint for getting the grocery lists a user has saved.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{AppState, json_error, stores::GroceryListStore};

/// The state needed to get a user's grocery lists.
#[derive(Clone)]
pub struct UserListsState {
    /// The store holding saved lists.
    pub grocery_lists: Arc<dyn GroceryListStore>,
}

impl FromRef<AppState> for UserListsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            grocery_lists: state.stores.grocery_lists.clone(),
        }
    }
}

/// A route handler that responds with every list saved by `user_id`, oldest
/// first. A user with no saved lists gets an empty array.
pub async fn get_user_lists_endpoint(
    State(state): State<UserListsState>,
    Path(user_id): Path<String>,
) -> Response {
    match state.grocery_lists.get_by_user(&user_id) {
        Ok(lists) => {
            tracing::info!("Retrieved {} lists for user {user_id}", lists.len());
            Json(lists).into_response()
        }
        Err(error) => {
            tracing::error!("Could not get grocery lists for user {user_id}: {error}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve grocery lists",
            )
        }
    }
}
