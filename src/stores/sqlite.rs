//! SQLite backed stores.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, Row, types::Type};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{
    Error,
    grocery_list::{GroceryItem, GroceryList, NewGroceryList},
    stores::{CallCountStore, GroceryListStore},
};

/// Initialize the grocery list table and indexes.
pub(crate) fn create_grocery_list_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS grocery_list (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            budget REAL NOT NULL,
            dietary_prefs TEXT NOT NULL,
            household_size INTEGER NOT NULL,
            items TEXT NOT NULL,
            total_cost REAL NOT NULL,
            under_budget INTEGER NOT NULL,
            swap_suggestion TEXT,
            savings_tip TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_grocery_list_user_id ON grocery_list(user_id);",
    )?;

    Ok(())
}

/// Initialize the table that counts external API calls per day.
pub(crate) fn create_call_count_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS api_call_limit (
            date TEXT PRIMARY KEY,
            call_count INTEGER NOT NULL DEFAULT 0
        )",
        (),
    )?;

    Ok(())
}

/// Saves grocery lists to a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteGroceryListStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteGroceryListStore {
    /// Create a new grocery list store. The tables must already exist, see
    /// [initialize](crate::initialize_db).
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl GroceryListStore for SQLiteGroceryListStore {
    fn create(&self, list: NewGroceryList) -> Result<GroceryList, Error> {
        let list = GroceryList::from_new(
            list,
            Uuid::new_v4().to_string(),
            OffsetDateTime::now_utc(),
        );
        let items = serde_json::to_string(&list.items)?;

        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection.execute(
            "INSERT INTO grocery_list (
                id, user_id, budget, dietary_prefs, household_size, items,
                total_cost, under_budget, swap_suggestion, savings_tip, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                list.id,
                list.user_id,
                list.budget,
                list.dietary_prefs,
                list.household_size,
                items,
                list.total_cost,
                list.under_budget,
                list.swap_suggestion,
                list.savings_tip,
                list.created_at,
            ],
        )?;

        Ok(list)
    }

    fn get_by_user(&self, user_id: &str) -> Result<Vec<GroceryList>, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection
            .prepare(
                "SELECT id, user_id, budget, dietary_prefs, household_size, items,
                    total_cost, under_budget, swap_suggestion, savings_tip, created_at
                FROM grocery_list
                WHERE user_id = :user_id
                ORDER BY created_at ASC, rowid ASC",
            )?
            .query_map(&[(":user_id", &user_id)], map_row)?
            .map(|maybe_list| maybe_list.map_err(|error| error.into()))
            .collect()
    }
}

fn map_row(row: &Row) -> Result<GroceryList, rusqlite::Error> {
    let raw_items: String = row.get(5)?;
    let items: Vec<GroceryItem> = serde_json::from_str(&raw_items).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(error))
    })?;

    Ok(GroceryList {
        id: row.get(0)?,
        user_id: row.get(1)?,
        budget: row.get(2)?,
        dietary_prefs: row.get(3)?,
        household_size: row.get(4)?,
        items,
        total_cost: row.get(6)?,
        under_budget: row.get(7)?,
        swap_suggestion: row.get(8)?,
        savings_tip: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Counts external API calls per day in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCallCountStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCallCountStore {
    /// Create a new call count store. The tables must already exist, see
    /// [initialize](crate::initialize_db).
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CallCountStore for SQLiteCallCountStore {
    fn get(&self, date: Date) -> Result<u32, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let count = connection
            .query_row(
                "SELECT call_count FROM api_call_limit WHERE date = ?1",
                (date,),
                |row| row.get(0),
            )
            .optional()?;

        Ok(count.unwrap_or(0))
    }

    fn increment(&self, date: Date) -> Result<(), Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        // A single statement so that concurrent increments are never lost.
        connection.execute(
            "INSERT INTO api_call_limit (date, call_count) VALUES (?1, 1)
            ON CONFLICT(date) DO UPDATE SET call_count = call_count + 1",
            (date,),
        )?;

        Ok(())
    }
}
