//! Builds a grocery list from external food database lookups.

use time::Date;

use crate::{
    food_source::FoodLookup,
    grocery_list::{GroceryItem, round_to_cents},
    random::{RandomSource, base_multiplier, draw_quantity},
    stores::CallCountStore,
};

/// The staples looked up in the food database, in order.
pub const SEARCH_TERMS: [&str; 6] = ["chicken", "rice", "eggs", "beans", "broccoli", "milk"];

/// The most items a list built from the food database will contain.
pub const MAX_EXTERNAL_ITEMS: usize = 8;

const DEFAULT_CATEGORY: &str = "general";

/// Try to build a grocery list from the food database.
///
/// One call is charged to `today`'s count before any lookups are made, even if
/// they all fail. Each of the [SEARCH_TERMS] is looked up in turn; failed
/// lookups are logged and skipped. Prices are not provided by the database so
/// each item gets a made-up unit price from `random`.
///
/// Returns `None` if no items could be found, in which case the caller should
/// fall back to the local catalog.
pub async fn fetch_external_items<R>(
    household_size: u8,
    today: Date,
    lookup: &dyn FoodLookup,
    call_counts: &dyn CallCountStore,
    random: &mut R,
) -> Option<Vec<GroceryItem>>
where
    R: RandomSource + Send,
{
    tracing::info!("Attempting to fetch grocery items from the food database");

    if let Err(error) = call_counts.increment(today) {
        tracing::error!("Could not record food database call for {today}: {error}");
        return None;
    }

    let multiplier = base_multiplier(household_size);
    let mut items = Vec::new();

    for term in SEARCH_TERMS {
        if items.len() >= MAX_EXTERNAL_ITEMS {
            break;
        }

        let food = match lookup.lookup(term).await {
            Ok(Some(food)) => food,
            Ok(None) => continue,
            Err(error) => {
                tracing::warn!("Failed to fetch \"{term}\" from the food database: {error}");
                continue;
            }
        };

        let unit_price = random.unit_price();
        let quantity = draw_quantity(multiplier, random);

        let name = food
            .label
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| term.to_owned());
        let category = food
            .category
            .filter(|category| !category.is_empty())
            .map(|category| category.to_lowercase())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned());

        items.push(GroceryItem {
            name,
            quantity: format!("{quantity} lb"),
            price: round_to_cents(unit_price * f64::from(quantity)),
            category: Some(category),
        });
    }

    if items.is_empty() {
        tracing::info!("The food database returned no items");
        None
    } else {
        tracing::info!("The food database returned {} items", items.len());
        Some(items)
    }
}
