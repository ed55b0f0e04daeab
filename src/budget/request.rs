//! The budget request and response bodies, and the validation between them.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    advice::{savings_tip, swap_suggestion},
    catalog::DietaryPreference,
    grocery_list::{GroceryItem, round_to_cents},
};

/// The smallest budget, in dollars, a list can be generated for.
pub const MIN_BUDGET: f64 = 1.0;

/// The largest household a list can be generated for.
pub const MAX_HOUSEHOLD_SIZE: u8 = 10;

/// The JSON body of a budget request, as sent by the client.
///
/// `household_size` is accepted as any number so that non-integers can be
/// rejected with a useful message instead of a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequestBody {
    /// The most the user wants to spend, in dollars.
    pub budget: f64,
    /// "none", "keto" or "vegan".
    pub dietary_prefs: String,
    /// The number of people to shop for.
    pub household_size: f64,
}

/// A validated budget request.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRequest {
    budget: f64,
    dietary_prefs: String,
    household_size: u8,
}

impl BudgetRequest {
    /// Validate a budget request.
    ///
    /// # Errors
    /// Returns [Error::InvalidBudgetRequest] if the budget is less than
    /// [MIN_BUDGET] or not a finite number, or if the household size is not a
    /// whole number between 1 and [MAX_HOUSEHOLD_SIZE].
    pub fn new(budget: f64, dietary_prefs: &str, household_size: f64) -> Result<Self, Error> {
        if !budget.is_finite() || budget < MIN_BUDGET {
            return Err(Error::InvalidBudgetRequest(format!(
                "budget must be a number of at least {MIN_BUDGET}"
            )));
        }

        if household_size.fract() != 0.0
            || !(1.0..=f64::from(MAX_HOUSEHOLD_SIZE)).contains(&household_size)
        {
            return Err(Error::InvalidBudgetRequest(format!(
                "householdSize must be a whole number from 1 to {MAX_HOUSEHOLD_SIZE}"
            )));
        }

        Ok(Self {
            budget,
            dietary_prefs: dietary_prefs.to_owned(),
            household_size: household_size as u8,
        })
    }

    /// The most the user wants to spend, in dollars.
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// The dietary preference exactly as the client sent it.
    pub fn dietary_prefs(&self) -> &str {
        &self.dietary_prefs
    }

    /// The diet the list must respect.
    pub fn dietary_preference(&self) -> DietaryPreference {
        DietaryPreference::from(self.dietary_prefs.as_str())
    }

    /// The number of people to shop for.
    pub fn household_size(&self) -> u8 {
        self.household_size
    }
}

impl TryFrom<BudgetRequestBody> for BudgetRequest {
    type Error = Error;

    fn try_from(body: BudgetRequestBody) -> Result<Self, Self::Error> {
        Self::new(body.budget, &body.dietary_prefs, body.household_size)
    }
}

/// A generated grocery list with its totals and advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResponse {
    /// The items to buy.
    pub items: Vec<GroceryItem>,
    /// The sum of the item prices, rounded to cents.
    pub total_cost: f64,
    /// Whether `total_cost` is no more than the budget.
    pub under_budget: bool,
    /// How to get back under budget. Only present when over budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_suggestion: Option<String>,
    /// A general tip for saving money on groceries.
    pub savings_tip: String,
}

/// Total up `items` against `budget` and attach the advice.
pub fn summarize(items: Vec<GroceryItem>, budget: f64) -> BudgetResponse {
    let total_cost = round_to_cents(items.iter().map(|item| item.price).sum());
    let under_budget = total_cost <= budget;
    let swap_suggestion = swap_suggestion(&items, total_cost, budget);
    let savings_tip = savings_tip(&items, budget, total_cost);

    BudgetResponse {
        items,
        total_cost,
        under_budget,
        swap_suggestion,
        savings_tip,
    }
}

#[cfg(test)]
mod budget_request_tests {
    use crate::{
        Error,
        budget::{BudgetRequest, BudgetRequestBody},
        catalog::DietaryPreference,
    };

    #[track_caller]
    fn assert_invalid(budget: f64, household_size: f64) {
        let got = BudgetRequest::new(budget, "none", household_size);

        assert!(
            matches!(got, Err(Error::InvalidBudgetRequest(_))),
            "want invalid request error for budget {budget} and household {household_size}, got {got:?}"
        );
    }

    #[test]
    fn accepts_valid_request() {
        let request = BudgetRequest::new(50.0, "vegan", 4.0).unwrap();

        assert_eq!(request.budget(), 50.0);
        assert_eq!(request.dietary_prefs(), "vegan");
        assert_eq!(request.dietary_preference(), DietaryPreference::Vegan);
        assert_eq!(request.household_size(), 4);
    }

    #[test]
    fn accepts_bounds() {
        assert!(BudgetRequest::new(1.0, "none", 1.0).is_ok());
        assert!(BudgetRequest::new(1.0, "none", 10.0).is_ok());
    }

    #[test]
    fn rejects_small_or_non_finite_budget() {
        assert_invalid(0.99, 2.0);
        assert_invalid(-10.0, 2.0);
        assert_invalid(f64::NAN, 2.0);
        assert_invalid(f64::INFINITY, 2.0);
    }

    #[test]
    fn rejects_household_out_of_range_or_fractional() {
        assert_invalid(50.0, 0.0);
        assert_invalid(50.0, 11.0);
        assert_invalid(50.0, 2.5);
        assert_invalid(50.0, f64::NAN);
    }

    #[test]
    fn unknown_diet_means_no_filtering() {
        let request = BudgetRequest::try_from(BudgetRequestBody {
            budget: 20.0,
            dietary_prefs: "paleo".to_owned(),
            household_size: 2.0,
        })
        .unwrap();

        assert_eq!(request.dietary_prefs(), "paleo");
        assert_eq!(request.dietary_preference(), DietaryPreference::None);
    }
}

#[cfg(test)]
mod summarize_tests {
    use crate::{budget::summarize, test_utils::six_grocery_items};

    #[test]
    fn six_items_fit_a_fifty_dollar_budget() {
        let response = summarize(six_grocery_items(), 50.0);

        assert_eq!(response.total_cost, 36.28);
        assert!(response.under_budget);
        assert_eq!(response.swap_suggestion, None);
        assert_eq!(
            response.savings_tip,
            "Buy Brown Rice in bulk to save $3-5 per pound"
        );
    }

    #[test]
    fn six_items_go_over_a_twenty_dollar_budget() {
        let response = summarize(six_grocery_items(), 20.0);

        assert_eq!(response.total_cost, 36.28);
        assert!(!response.under_budget);
        assert_eq!(
            response.swap_suggestion.as_deref(),
            Some("Swap Chicken Breast for eggs to save $4.79")
        );
    }

    #[test]
    fn total_equal_to_budget_is_under_budget() {
        let response = summarize(six_grocery_items(), 36.28);

        assert!(response.under_budget);
        assert_eq!(response.swap_suggestion, None);
    }

    #[test]
    fn no_items_is_free_and_under_budget() {
        let response = summarize(Vec::new(), 5.0);

        assert!(response.items.is_empty());
        assert_eq!(response.total_cost, 0.0);
        assert!(response.under_budget);
        assert_eq!(response.swap_suggestion, None);
    }

    #[test]
    fn swap_suggestion_is_omitted_from_json_when_absent() {
        let response = summarize(six_grocery_items(), 50.0);

        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("swapSuggestion").is_none());
        assert_eq!(json["totalCost"], 36.28);
        assert_eq!(json["underBudget"], true);
    }
}
