//! Generating a grocery list for a budget.

mod endpoint;
mod planner;
mod request;

pub use endpoint::create_budget_endpoint;
pub use planner::{BudgetState, plan_grocery_list};
pub use request::{BudgetRequest, BudgetRequestBody, BudgetResponse, summarize};
