//! Rule-based advice shown alongside a grocery list.

use crate::grocery_list::GroceryItem;

/// Only items pricier than this are worth swapping out.
const SWAP_PRICE_THRESHOLD: f64 = 5.0;

/// The share of an item's price a swap is expected to save.
const SWAP_SAVINGS_RATE: f64 = 0.4;

/// Known substitutes for commonly over-budget items.
const SUBSTITUTES: [(&str, &str); 4] = [
    ("Salmon Fillet", "canned tuna"),
    ("Ground Beef", "black beans"),
    ("Chicken Breast", "eggs"),
    ("Cheddar Cheese", "Greek yogurt"),
];

const GENERIC_SUBSTITUTE: &str = "a cheaper alternative";

const STORE_BRAND_SUGGESTION: &str = "Consider buying store brands to reduce costs";

/// Suggest a swap that would bring an over-budget list closer to `budget`.
///
/// Returns `None` when the list is within budget.
pub fn swap_suggestion(items: &[GroceryItem], total_cost: f64, budget: f64) -> Option<String> {
    if total_cost <= budget {
        return None;
    }

    let overage = total_cost - budget;
    let most_expensive = items
        .iter()
        .filter(|item| item.price > SWAP_PRICE_THRESHOLD)
        .reduce(|best, item| if item.price > best.price { item } else { best });

    let Some(item) = most_expensive else {
        return Some(STORE_BRAND_SUGGESTION.to_owned());
    };

    let savings = f64::min(item.price * SWAP_SAVINGS_RATE, overage);
    let substitute = SUBSTITUTES
        .iter()
        .find(|(name, _)| *name == item.name)
        .map_or(GENERIC_SUBSTITUTE, |(_, substitute)| *substitute);

    Some(format!(
        "Swap {} for {substitute} to save ${savings:.2}",
        item.name
    ))
}

/// What a savings tip rule looks at.
struct TipContext<'a> {
    items: &'a [GroceryItem],
    budget: f64,
    total_cost: f64,
}

impl TipContext<'_> {
    fn category_total(&self, category: &str) -> f64 {
        self.items
            .iter()
            .filter(|item| item.category.as_deref().unwrap_or("other") == category)
            .map(|item| item.price)
            .sum()
    }
}

/// A savings tip rule: produces a tip if it applies to the list.
type TipRule = fn(&TipContext) -> Option<String>;

/// The savings tip rules in priority order. The first rule that produces a
/// tip wins, and [DEFAULT_TIP] is used when none do.
const TIP_RULES: &[TipRule] = &[
    snack_heavy_tip,
    bulk_staple_tip,
    expensive_protein_tip,
    near_budget_tip,
];

const DEFAULT_TIP: &str = "Plan meals around sales and seasonal produce for maximum savings";

const BULK_STAPLES: [&str; 3] = ["rice", "beans", "pasta"];

fn snack_heavy_tip(context: &TipContext) -> Option<String> {
    let extras = context.category_total("snacks") + context.category_total("pantry");

    (extras > context.total_cost * 0.2)
        .then(|| "Reduce snack purchases to save up to $10 on your grocery bill".to_owned())
}

fn bulk_staple_tip(context: &TipContext) -> Option<String> {
    context
        .items
        .iter()
        .find(|item| {
            let name = item.name.to_lowercase();
            BULK_STAPLES.iter().any(|staple| name.contains(staple))
        })
        .map(|item| format!("Buy {} in bulk to save $3-5 per pound", item.name))
}

fn expensive_protein_tip(context: &TipContext) -> Option<String> {
    context
        .items
        .iter()
        .any(|item| item.is_in("protein") && item.price > 10.0)
        .then(|| {
            "Consider meal prepping to reduce food waste and save 20-30% on groceries".to_owned()
        })
}

fn near_budget_tip(context: &TipContext) -> Option<String> {
    (context.total_cost / context.budget > 0.9)
        .then(|| "Shop with a list and avoid impulse purchases to stay within budget".to_owned())
}

/// Pick the savings tip for a list.
pub fn savings_tip(items: &[GroceryItem], budget: f64, total_cost: f64) -> String {
    let context = TipContext {
        items,
        budget,
        total_cost,
    };

    TIP_RULES
        .iter()
        .find_map(|rule| rule(&context))
        .unwrap_or_else(|| DEFAULT_TIP.to_owned())
}
