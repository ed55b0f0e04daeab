//! Greedy selection of catalog items under a budget.

use crate::{
    catalog::CatalogItem,
    grocery_list::{GroceryItem, round_to_cents},
    random::{RandomSource, base_multiplier, draw_quantity},
};

/// The most items a fallback list will contain.
pub const MAX_FALLBACK_ITEMS: usize = 10;

/// No single item may cost more than this fraction of the budget that is left
/// when it is considered.
pub const MAX_ITEM_BUDGET_FRACTION: f64 = 0.2;

/// Pick grocery items for `household_size` people from `candidates`.
///
/// Candidates are considered cheapest first. Each one gets a random quantity
/// and is accepted only if its total price fits within
/// [MAX_ITEM_BUDGET_FRACTION] of the remaining budget. Rejected items are not
/// revisited. At most [MAX_FALLBACK_ITEMS] items are returned.
///
/// The per-item rule keeps the list well under `budget` in practice, but it
/// is not a hard ceiling. Callers compare the total against the budget
/// themselves.
pub fn allocate(
    candidates: &[&CatalogItem],
    budget: f64,
    household_size: u8,
    random: &mut impl RandomSource,
) -> Vec<GroceryItem> {
    let mut candidates = candidates.to_vec();
    candidates.sort_by(|a, b| a.unit_price.total_cmp(&b.unit_price));

    let multiplier = base_multiplier(household_size);
    let mut remaining_budget = budget;
    let mut items = Vec::new();

    for candidate in candidates {
        if items.len() >= MAX_FALLBACK_ITEMS {
            break;
        }

        let quantity = draw_quantity(multiplier, random);
        let total_price = candidate.unit_price * f64::from(quantity);

        if total_price > remaining_budget * MAX_ITEM_BUDGET_FRACTION {
            continue;
        }

        items.push(GroceryItem {
            name: candidate.name.clone(),
            quantity: format!("{quantity} {}", candidate.unit),
            price: round_to_cents(total_price),
            category: Some(candidate.category.as_str().to_owned()),
        });
        remaining_budget -= total_price;
    }

    items
}
