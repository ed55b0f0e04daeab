//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::{catalog::Catalog, food_source::FoodLookup, stores::Stores};

/// The default number of times per day the food database may be tried.
pub const DEFAULT_DAILY_CALL_LIMIT: u32 = 150;

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The local catalog, shared read-only by every request.
    pub catalog: Arc<Catalog>,

    /// The grocery list and call count stores.
    pub stores: Stores,

    /// The external food database.
    pub food_lookup: Arc<dyn FoodLookup>,

    /// How many times per day the food database may be tried.
    pub daily_call_limit: u32,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `daily_call_limit` caps the food database attempts per UTC day, see
    /// [DEFAULT_DAILY_CALL_LIMIT].
    pub fn new(
        catalog: Catalog,
        stores: Stores,
        food_lookup: Arc<dyn FoodLookup>,
        daily_call_limit: u32,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            stores,
            food_lookup,
            daily_call_limit,
        }
    }
}
