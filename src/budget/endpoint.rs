//! Defines the endpoint for generating a grocery list.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use time::OffsetDateTime;

use crate::{
    Error,
    budget::{BudgetRequest, BudgetRequestBody, BudgetResponse, BudgetState, plan_grocery_list},
    random::RngSource,
};

/// A route handler for generating a grocery list from a budget.
///
/// Responds with 400 and a `{"message": ...}` body if the request body is not
/// valid JSON, is missing a field, or fails validation.
pub async fn create_budget_endpoint(
    State(state): State<BudgetState>,
    body: Result<Json<BudgetRequestBody>, JsonRejection>,
) -> Result<Json<BudgetResponse>, Error> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("Rejected budget request body: {rejection}");
        Error::InvalidBudgetRequest(rejection.body_text())
    })?;
    let request = BudgetRequest::try_from(body)?;

    let today = OffsetDateTime::now_utc().date();
    let mut random = RngSource::from_entropy();

    let response = plan_grocery_list(&request, today, &state, &mut random).await?;

    Ok(Json(response))
}
