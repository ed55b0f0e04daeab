//! Grocery items and the grocery lists that users save.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Round a dollar amount to whole cents.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A line on a grocery list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    /// The product name.
    pub name: String,
    /// How much to buy, e.g. "2 lb".
    pub quantity: String,
    /// The total price for `quantity`, in dollars.
    pub price: f64,
    /// The aisle the product belongs to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl GroceryItem {
    /// Whether the item's category is `category`.
    pub fn is_in(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

/// The ID of a saved grocery list.
pub type GroceryListId = String;

/// The data needed to save a grocery list.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGroceryList {
    /// Who the list belongs to.
    pub user_id: String,
    /// The budget the list was generated for.
    pub budget: f64,
    /// The dietary preference the list was generated for.
    pub dietary_prefs: String,
    /// The number of people the list feeds.
    pub household_size: u8,
    /// The items on the list.
    pub items: Vec<GroceryItem>,
    /// The sum of the item prices.
    pub total_cost: f64,
    /// Whether the total cost fits the budget.
    pub under_budget: bool,
    /// The swap suggestion shown with the list, if any.
    pub swap_suggestion: Option<String>,
    /// The savings tip shown with the list, if any.
    pub savings_tip: Option<String>,
}

/// A grocery list that has been saved for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryList {
    /// The unique ID of the list.
    pub id: GroceryListId,
    /// Who the list belongs to.
    pub user_id: String,
    /// The budget the list was generated for.
    pub budget: f64,
    /// The dietary preference the list was generated for.
    pub dietary_prefs: String,
    /// The number of people the list feeds.
    pub household_size: u8,
    /// The items on the list.
    pub items: Vec<GroceryItem>,
    /// The sum of the item prices.
    pub total_cost: f64,
    /// Whether the total cost fits the budget.
    pub under_budget: bool,
    /// The swap suggestion shown with the list, if any.
    pub swap_suggestion: Option<String>,
    /// The savings tip shown with the list, if any.
    pub savings_tip: Option<String>,
    /// When the list was saved.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl GroceryList {
    /// Attach an ID and creation time to `list`.
    pub fn from_new(list: NewGroceryList, id: GroceryListId, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            user_id: list.user_id,
            budget: list.budget,
            dietary_prefs: list.dietary_prefs,
            household_size: list.household_size,
            items: list.items,
            total_cost: list.total_cost,
            under_budget: list.under_budget,
            swap_suggestion: list.swap_suggestion,
            savings_tip: list.savings_tip,
            created_at,
        }
    }
}
