#![allow(missing_docs)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use serde_json::Value;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    catalog::{Catalog, CatalogItem, Category},
    food_source::{FoodLookup, FoodMatch},
    grocery_list::{GroceryItem, GroceryList, NewGroceryList},
    random::RandomSource,
    stores::{CallCountStore, GroceryListStore},
};

/// A [RandomSource] that always returns the same values.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedRandom {
    scale: f64,
    price: f64,
}

impl FixedRandom {
    pub(crate) fn new(scale: f64, price: f64) -> Self {
        Self { scale, price }
    }
}

impl RandomSource for FixedRandom {
    fn scale_factor(&mut self) -> f64 {
        self.scale
    }

    fn unit_price(&mut self) -> f64 {
        self.price
    }
}

pub(crate) fn catalog_item(name: &str, category: Category, unit_price: f64, unit: &str) -> CatalogItem {
    CatalogItem {
        name: name.to_owned(),
        category,
        unit_price,
        unit: unit.to_owned(),
    }
}

/// Chicken breast, cheddar, Greek yogurt, eggs, brown rice and broccoli.
pub(crate) fn six_item_catalog() -> Catalog {
    Catalog::new(vec![
        catalog_item("Chicken Breast", Category::Protein, 11.98, "lb"),
        catalog_item("Cheddar Cheese", Category::Dairy, 7.47, "lb"),
        catalog_item("Greek Yogurt", Category::Dairy, 5.98, "tub"),
        catalog_item("Eggs", Category::Dairy, 4.29, "dozen"),
        catalog_item("Brown Rice", Category::Grains, 2.07, "lb"),
        catalog_item("Broccoli", Category::Vegetables, 4.49, "lb"),
    ])
}

pub(crate) fn grocery_item(name: &str, category: &str, price: f64) -> GroceryItem {
    GroceryItem {
        name: name.to_owned(),
        quantity: "1 lb".to_owned(),
        price,
        category: Some(category.to_owned()),
    }
}

/// The items of [six_item_catalog] at one unit each, totalling $36.28.
pub(crate) fn six_grocery_items() -> Vec<GroceryItem> {
    vec![
        grocery_item("Chicken Breast", "protein", 11.98),
        grocery_item("Cheddar Cheese", "dairy", 7.47),
        grocery_item("Greek Yogurt", "dairy", 5.98),
        grocery_item("Eggs", "dairy", 4.29),
        grocery_item("Brown Rice", "grains", 2.07),
        grocery_item("Broccoli", "vegetables", 4.49),
    ]
}

pub(crate) fn new_grocery_list(user_id: &str) -> NewGroceryList {
    NewGroceryList {
        user_id: user_id.to_owned(),
        budget: 50.0,
        dietary_prefs: "none".to_owned(),
        household_size: 2,
        items: six_grocery_items(),
        total_cost: 36.28,
        under_budget: true,
        swap_suggestion: None,
        savings_tip: Some("Buy Brown Rice in bulk to save $3-5 per pound".to_owned()),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum StubMode {
    /// Every term matches.
    MatchAll,
    /// Only the configured terms match, the rest have no match.
    MatchSome(HashMap<String, FoodMatch>),
    /// Every lookup fails.
    FailAll,
}

/// A [FoodLookup] with canned answers that records the terms it was asked for.
#[derive(Debug)]
pub(crate) struct StubFoodLookup {
    mode: StubMode,
    failing_terms: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl StubFoodLookup {
    fn new(mode: StubMode) -> Self {
        Self {
            mode,
            failing_terms: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn always_matching() -> Self {
        Self::new(StubMode::MatchAll)
    }

    pub(crate) fn with_matches(matches: &[(&str, FoodMatch)]) -> Self {
        Self::new(StubMode::MatchSome(
            matches
                .iter()
                .map(|(term, food)| (term.to_string(), food.clone()))
                .collect(),
        ))
    }

    pub(crate) fn failing() -> Self {
        Self::new(StubMode::FailAll)
    }

    /// Make lookups for `terms` fail.
    pub(crate) fn failing_on(mut self, terms: &[&str]) -> Self {
        self.failing_terms = terms.iter().map(|term| term.to_string()).collect();
        self
    }

    /// The terms looked up so far, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FoodLookup for StubFoodLookup {
    async fn lookup(&self, term: &str) -> Result<Option<FoodMatch>, Error> {
        self.calls.lock().unwrap().push(term.to_owned());

        if self.failing_terms.iter().any(|failing| failing == term) {
            return Err(Error::FoodLookup(format!("stub failure for {term}")));
        }

        match &self.mode {
            StubMode::MatchAll => Ok(Some(FoodMatch {
                label: Some(term.to_owned()),
                category: Some("Generic foods".to_owned()),
            })),
            StubMode::MatchSome(matches) => Ok(matches.get(term).cloned()),
            StubMode::FailAll => Err(Error::FoodLookup(format!("stub failure for {term}"))),
        }
    }
}

/// A [CallCountStore] whose every operation fails.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingCallCountStore;

impl CallCountStore for FailingCallCountStore {
    fn get(&self, _date: Date) -> Result<u32, Error> {
        Err(Error::DatabaseLockError)
    }

    fn increment(&self, _date: Date) -> Result<(), Error> {
        Err(Error::DatabaseLockError)
    }
}

/// A [GroceryListStore] that counts how many times `create` was called.
#[derive(Debug, Default)]
pub(crate) struct SpyGroceryListStore {
    create_calls: AtomicUsize,
}

impl SpyGroceryListStore {
    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

impl GroceryListStore for SpyGroceryListStore {
    fn create(&self, list: NewGroceryList) -> Result<GroceryList, Error> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        Ok(GroceryList::from_new(
            list,
            "spy-list".to_owned(),
            OffsetDateTime::UNIX_EPOCH,
        ))
    }

    fn get_by_user(&self, _user_id: &str) -> Result<Vec<GroceryList>, Error> {
        Ok(Vec::new())
    }
}

/// A [GroceryListStore] whose every operation fails.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingGroceryListStore;

impl GroceryListStore for FailingGroceryListStore {
    fn create(&self, _list: NewGroceryList) -> Result<GroceryList, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get_by_user(&self, _user_id: &str) -> Result<Vec<GroceryList>, Error> {
        Err(Error::DatabaseLockError)
    }
}

#[track_caller]
pub(crate) fn assert_error_message(body: &Value) {
    let message = body["message"]
        .as_str()
        .expect("error body should have a string message");
    assert!(!message.is_empty(), "error message should not be empty");
}
