//! Grocery items sourced from an external food database.

mod edamam;
mod fetch;

use async_trait::async_trait;

use crate::Error;

pub use edamam::{EdamamClient, EdamamConfig};
pub use fetch::fetch_external_items;
#[cfg(test)]
pub(crate) use fetch::SEARCH_TERMS;

/// The best match for a search term in a food database.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FoodMatch {
    /// The display name of the food, if the database provided one.
    pub label: Option<String>,
    /// The database's category for the food, e.g. "Generic foods".
    pub category: Option<String>,
}

/// Looks up foods by name in an external database.
#[async_trait]
pub trait FoodLookup: Send + Sync {
    /// Find the best match for `term`.
    ///
    /// Returns `Ok(None)` if the database has no match.
    ///
    /// # Errors
    /// Returns [Error::FoodLookup] if the request fails or times out.
    async fn lookup(&self, term: &str) -> Result<Option<FoodMatch>, Error>;
}
