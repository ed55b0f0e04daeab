//! Defines the endpoint for saving a grocery list for a user.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    grocery_list::{GroceryItem, GroceryListId, NewGroceryList},
    json_error,
    stores::GroceryListStore,
};

/// The state needed to save a grocery list.
#[derive(Clone)]
pub struct SaveListState {
    /// The store the list is saved to.
    pub grocery_lists: Arc<dyn GroceryListStore>,
}

impl FromRef<AppState> for SaveListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            grocery_lists: state.stores.grocery_lists.clone(),
        }
    }
}

/// The JSON body of a save list request.
///
/// Every field is optional here so that a missing field can be reported as
/// "Missing required fields" rather than a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveListBody {
    /// Who the list belongs to.
    pub user_id: Option<String>,
    /// The budget the list was generated for.
    pub budget: Option<f64>,
    /// The dietary preference the list was generated for.
    pub dietary_prefs: Option<String>,
    /// The number of people the list feeds.
    pub household_size: Option<u8>,
    /// The items on the list.
    pub items: Option<Vec<GroceryItem>>,
    /// The sum of the item prices.
    pub total_cost: Option<f64>,
    /// Whether the total cost fits the budget.
    pub under_budget: Option<bool>,
    /// The swap suggestion shown with the list.
    pub swap_suggestion: Option<String>,
    /// The savings tip shown with the list.
    pub savings_tip: Option<String>,
}

impl TryFrom<SaveListBody> for NewGroceryList {
    type Error = Error;

    fn try_from(body: SaveListBody) -> Result<Self, Self::Error> {
        let user_id = body
            .user_id
            .filter(|user_id| !user_id.is_empty())
            .ok_or(Error::MissingRequiredFields)?;
        let items = body
            .items
            .filter(|items| !items.is_empty())
            .ok_or(Error::MissingRequiredFields)?;

        Ok(NewGroceryList {
            user_id,
            budget: body.budget.ok_or(Error::MissingRequiredFields)?,
            dietary_prefs: body.dietary_prefs.ok_or(Error::MissingRequiredFields)?,
            household_size: body.household_size.ok_or(Error::MissingRequiredFields)?,
            items,
            total_cost: body.total_cost.ok_or(Error::MissingRequiredFields)?,
            under_budget: body.under_budget.ok_or(Error::MissingRequiredFields)?,
            swap_suggestion: body.swap_suggestion.filter(|text| !text.is_empty()),
            savings_tip: body.savings_tip.filter(|text| !text.is_empty()),
        })
    }
}

/// The response to a successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveListResponse {
    /// Always `true`.
    pub success: bool,
    /// The ID assigned to the saved list.
    pub list_id: GroceryListId,
}

/// A route handler for saving a grocery list.
///
/// Nothing is written unless the body has a user ID, at least one item and
/// the rest of the list's fields.
pub async fn save_list_endpoint(
    State(state): State<SaveListState>,
    body: Result<Json<SaveListBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!("Rejected save list body: {rejection}");
            return json_error(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    let new_list = match NewGroceryList::try_from(body) {
        Ok(new_list) => new_list,
        Err(error) => return error.into_response(),
    };

    match state.grocery_lists.create(new_list) {
        Ok(list) => {
            tracing::info!("Saved grocery list {} for user {}", list.id, list.user_id);
            Json(SaveListResponse {
                success: true,
                list_id: list.id,
            })
            .into_response()
        }
        Err(error) => {
            tracing::error!("Could not save grocery list: {error}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save grocery list",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        stores::{GroceryListStore, InMemoryGroceryListStore},
        test_utils::{FailingGroceryListStore, SpyGroceryListStore},
    };

    use super::{SaveListResponse, SaveListState, save_list_endpoint};

    fn get_server(grocery_lists: Arc<dyn GroceryListStore>) -> TestServer {
        let app = Router::new()
            .route(endpoints::SAVE_LIST, post(save_list_endpoint))
            .with_state(SaveListState { grocery_lists });

        TestServer::new(app).expect("Could not create test server.")
    }

    fn valid_body() -> Value {
        json!({
            "userId": "alice",
            "budget": 50,
            "dietaryPrefs": "none",
            "householdSize": 2,
            "items": [
                {"name": "Brown Rice", "quantity": "1 lb", "price": 2.07, "category": "grains"}
            ],
            "totalCost": 2.07,
            "underBudget": true,
            "savingsTip": "Buy Brown Rice in bulk to save $3-5 per pound"
        })
    }

    #[tokio::test]
    async fn saves_list_and_returns_id() {
        let store = Arc::new(InMemoryGroceryListStore::default());
        let server = get_server(store.clone());

        let response = server.post(endpoints::SAVE_LIST).json(&valid_body()).await;

        response.assert_status_ok();
        let body = response.json::<SaveListResponse>();
        assert!(body.success);
        let saved = store.get_by_user("alice").unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, body.list_id);
        assert_eq!(saved[0].items[0].name, "Brown Rice");
        assert_eq!(saved[0].swap_suggestion, None);
    }

    #[tokio::test]
    async fn empty_items_is_rejected_without_touching_store() {
        let store = Arc::new(SpyGroceryListStore::default());
        let server = get_server(store.clone());
        let mut body = valid_body();
        body["items"] = json!([]);

        let response = server.post(endpoints::SAVE_LIST).json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"message": "Missing required fields"}));
        assert_eq!(store.create_calls(), 0);
    }

    #[tokio::test]
    async fn missing_items_is_rejected_without_touching_store() {
        let store = Arc::new(SpyGroceryListStore::default());
        let server = get_server(store.clone());
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("items");

        let response = server.post(endpoints::SAVE_LIST).json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(store.create_calls(), 0);
    }

    #[tokio::test]
    async fn missing_or_empty_user_id_is_rejected() {
        let store = Arc::new(SpyGroceryListStore::default());
        let server = get_server(store.clone());
        let mut empty_user = valid_body();
        empty_user["userId"] = json!("");
        let mut no_user = valid_body();
        no_user.as_object_mut().unwrap().remove("userId");

        for body in [empty_user, no_user] {
            let response = server.post(endpoints::SAVE_LIST).json(&body).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            response.assert_json(&json!({"message": "Missing required fields"}));
        }
        assert_eq!(store.create_calls(), 0);
    }

    #[tokio::test]
    async fn missing_total_cost_is_rejected() {
        let store = Arc::new(SpyGroceryListStore::default());
        let server = get_server(store.clone());
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("totalCost");

        let response = server.post(endpoints::SAVE_LIST).json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(store.create_calls(), 0);
    }

    #[tokio::test]
    async fn store_failure_is_server_error() {
        let server = get_server(Arc::new(FailingGroceryListStore));

        let response = server.post(endpoints::SAVE_LIST).json(&valid_body()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({"message": "Failed to save grocery list"}));
    }
}
