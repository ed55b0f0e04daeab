//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState, Error,
    budget::create_budget_endpoint,
    endpoints,
    grocery_list::{get_user_lists_endpoint, save_list_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::BUDGET, post(create_budget_endpoint))
        .route(endpoints::SAVE_LIST, post(save_list_endpoint))
        .route(endpoints::USER_LISTS, get(get_user_lists_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState, build_router,
        budget::BudgetResponse,
        catalog::Catalog,
        endpoints,
        grocery_list::{GroceryList, SaveListResponse},
        stores::Stores,
        test_utils::StubFoodLookup,
    };

    fn get_server() -> TestServer {
        let state = AppState::new(
            Catalog::builtin().expect("Could not load built-in catalog"),
            Stores::in_memory(),
            Arc::new(StubFoodLookup::failing()),
            150,
        );

        TestServer::new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_server();

        let response = server.get("/api/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"message": "Not found"}));
    }

    #[tokio::test]
    async fn generated_list_can_be_saved_and_retrieved() {
        let server = get_server();

        let generated = server
            .post(endpoints::BUDGET)
            .json(&json!({"budget": 75, "dietaryPrefs": "keto", "householdSize": 3}))
            .await
            .json::<BudgetResponse>();

        let mut save_body = serde_json::to_value(&generated).unwrap();
        save_body["userId"] = json!("user-1");
        save_body["budget"] = json!(75);
        save_body["dietaryPrefs"] = json!("keto");
        save_body["householdSize"] = json!(3);
        let saved = server
            .post(endpoints::SAVE_LIST)
            .json(&save_body)
            .await
            .json::<SaveListResponse>();

        let lists = server
            .get(&endpoints::format_endpoint(endpoints::USER_LISTS, "user-1"))
            .await
            .json::<Vec<GroceryList>>();

        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].id, saved.list_id);
        assert_eq!(lists[0].items, generated.items);
        assert_eq!(lists[0].total_cost, generated.total_cost);
        assert_eq!(lists[0].under_budget, generated.under_budget);
        assert_eq!(lists[0].savings_tip.as_deref(), Some(generated.savings_tip.as_str()));
        assert_eq!(lists[0].household_size, 3);
    }

    #[tokio::test]
    async fn saved_list_json_uses_camel_case() {
        let server = get_server();
        server
            .post(endpoints::SAVE_LIST)
            .json(&json!({
                "userId": "user-2",
                "budget": 20,
                "dietaryPrefs": "none",
                "householdSize": 1,
                "items": [{"name": "Eggs", "quantity": "1 dozen", "price": 4.29}],
                "totalCost": 4.29,
                "underBudget": true
            }))
            .await
            .assert_status_ok();

        let lists = server
            .get(&endpoints::format_endpoint(endpoints::USER_LISTS, "user-2"))
            .await
            .json::<Value>();

        let list = &lists[0];
        assert_eq!(list["userId"], "user-2");
        assert_eq!(list["dietaryPrefs"], "none");
        assert_eq!(list["householdSize"], 1);
        assert_eq!(list["totalCost"], 4.29);
        assert_eq!(list["underBudget"], true);
        assert!(list["swapSuggestion"].is_null());
        assert!(list["createdAt"].is_string());
    }
}
