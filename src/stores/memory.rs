//! Stores that keep their data in process memory, used when no database is configured.

use std::{collections::HashMap, sync::Mutex};

use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{
    Error,
    grocery_list::{GroceryList, NewGroceryList},
    stores::{CallCountStore, GroceryListStore},
};

/// Keeps saved grocery lists in memory.
#[derive(Debug, Default)]
pub struct InMemoryGroceryListStore {
    lists: Mutex<Vec<GroceryList>>,
}

impl GroceryListStore for InMemoryGroceryListStore {
    fn create(&self, list: NewGroceryList) -> Result<GroceryList, Error> {
        let list = GroceryList::from_new(
            list,
            Uuid::new_v4().to_string(),
            OffsetDateTime::now_utc(),
        );

        self.lists
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .push(list.clone());

        Ok(list)
    }

    fn get_by_user(&self, user_id: &str) -> Result<Vec<GroceryList>, Error> {
        let lists = self.lists.lock().map_err(|_| Error::DatabaseLockError)?;

        Ok(lists
            .iter()
            .filter(|list| list.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Keeps the daily external API call counts in memory.
#[derive(Debug, Default)]
pub struct InMemoryCallCountStore {
    counts: Mutex<HashMap<Date, u32>>,
}

impl CallCountStore for InMemoryCallCountStore {
    fn get(&self, date: Date) -> Result<u32, Error> {
        let counts = self.counts.lock().map_err(|_| Error::DatabaseLockError)?;

        Ok(counts.get(&date).copied().unwrap_or(0))
    }

    fn increment(&self, date: Date) -> Result<(), Error> {
        let mut counts = self.counts.lock().map_err(|_| Error::DatabaseLockError)?;
        *counts.entry(date).or_insert(0) += 1;

        Ok(())
    }
}
