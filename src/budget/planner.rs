//! Decides where a grocery list comes from and puts the response together.

use std::sync::Arc;

use axum::extract::FromRef;
use time::Date;

use crate::{
    AppState, Error,
    allocator::allocate,
    budget::{BudgetRequest, BudgetResponse, summarize},
    catalog::Catalog,
    food_source::{FoodLookup, fetch_external_items},
    random::RandomSource,
    stores::CallCountStore,
};

/// The state needed to generate a grocery list.
#[derive(Clone)]
pub struct BudgetState {
    /// The local catalog used when the food database is unavailable.
    pub catalog: Arc<Catalog>,
    /// The daily food database call counts.
    pub call_counts: Arc<dyn CallCountStore>,
    /// The food database.
    pub food_lookup: Arc<dyn FoodLookup>,
    /// How many times per day the food database may be tried.
    pub daily_call_limit: u32,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            catalog: state.catalog.clone(),
            call_counts: state.stores.call_counts.clone(),
            food_lookup: state.food_lookup.clone(),
            daily_call_limit: state.daily_call_limit,
        }
    }
}

/// Generate a grocery list for `request`.
///
/// The food database is tried first if fewer than `daily_call_limit` attempts
/// have been made `today`. If the limit has been reached, or the database
/// returns nothing, the list is built from the local catalog instead. There is
/// no second attempt at the food database.
///
/// The limit is checked and then charged as two separate steps, so
/// simultaneous requests may go slightly over it.
///
/// # Errors
/// Returns an error if today's call count cannot be read.
pub async fn plan_grocery_list<R>(
    request: &BudgetRequest,
    today: Date,
    state: &BudgetState,
    random: &mut R,
) -> Result<BudgetResponse, Error>
where
    R: RandomSource + Send,
{
    tracing::info!(
        "Budget request: ${:.2}, {}, {} people",
        request.budget(),
        request.dietary_prefs(),
        request.household_size()
    );

    let call_count = state.call_counts.get(today)?;

    let external_items = if call_count < state.daily_call_limit {
        fetch_external_items(
            request.household_size(),
            today,
            state.food_lookup.as_ref(),
            state.call_counts.as_ref(),
            random,
        )
        .await
    } else {
        tracing::info!(
            "Food database limit reached ({call_count}/{}), using the local catalog",
            state.daily_call_limit
        );
        None
    };

    let items = match external_items {
        Some(items) => {
            tracing::info!(
                "Using items from the food database (call {}/{})",
                call_count + 1,
                state.daily_call_limit
            );
            items
        }
        None => {
            tracing::info!("Using items from the local catalog");
            let candidates = state.catalog.filter(request.dietary_preference());
            allocate(
                &candidates,
                request.budget(),
                request.household_size(),
                random,
            )
        }
    };

    let response = summarize(items, request.budget());

    tracing::info!(
        "Generated list: {} items, ${:.2} ({} budget)",
        response.items.len(),
        response.total_cost,
        if response.under_budget { "under" } else { "over" }
    );

    Ok(response)
}
