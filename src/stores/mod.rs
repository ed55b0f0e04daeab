//! Contains the traits for persisting grocery lists and external API call counts, and their
//! SQLite and in-memory implementations.

mod memory;
mod sqlite;

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;
use time::Date;

use crate::{
    Error,
    db::initialize,
    grocery_list::{GroceryList, NewGroceryList},
};

pub use memory::{InMemoryCallCountStore, InMemoryGroceryListStore};
pub use sqlite::{SQLiteCallCountStore, SQLiteGroceryListStore};
pub(crate) use sqlite::{create_call_count_table, create_grocery_list_table};

/// Handles the creation and retrieval of saved grocery lists.
pub trait GroceryListStore: Send + Sync {
    /// Save a new list, assigning it an ID and creation time.
    fn create(&self, list: NewGroceryList) -> Result<GroceryList, Error>;

    /// Get every list saved by `user_id`, oldest first.
    fn get_by_user(&self, user_id: &str) -> Result<Vec<GroceryList>, Error>;
}

/// Counts calls to the external food database per calendar day.
///
/// A date that has never been incremented has a count of zero, so counts
/// reset simply by the date rolling over.
pub trait CallCountStore: Send + Sync {
    /// The number of calls recorded for `date`.
    fn get(&self, date: Date) -> Result<u32, Error>;

    /// Record one more call for `date`.
    fn increment(&self, date: Date) -> Result<(), Error>;
}

/// Where the application keeps its data.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// A SQLite database file.
    Sqlite(PathBuf),
    /// Process memory. Everything is lost on restart.
    InMemory,
}

impl StorageBackend {
    /// Use SQLite if a database path was configured, otherwise memory.
    pub fn from_db_path(db_path: Option<PathBuf>) -> Self {
        match db_path {
            Some(path) => StorageBackend::Sqlite(path),
            None => StorageBackend::InMemory,
        }
    }
}

/// The stores used by the application, chosen once at start up.
#[derive(Clone)]
pub struct Stores {
    /// The saved grocery lists.
    pub grocery_lists: Arc<dyn GroceryListStore>,
    /// The daily external API call counts.
    pub call_counts: Arc<dyn CallCountStore>,
}

impl Stores {
    /// Open the stores for `backend`.
    ///
    /// For SQLite, this opens (or creates) the database file and adds the
    /// application tables.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(backend: &StorageBackend) -> Result<Self, Error> {
        match backend {
            StorageBackend::Sqlite(path) => {
                let connection = Connection::open(path)?;
                Self::sqlite(connection)
            }
            StorageBackend::InMemory => Ok(Self::in_memory()),
        }
    }

    /// SQLite backed stores sharing `connection`.
    ///
    /// # Errors
    /// Returns an error if the tables cannot be created.
    pub fn sqlite(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;
        let connection = Arc::new(Mutex::new(connection));

        Ok(Self {
            grocery_lists: Arc::new(SQLiteGroceryListStore::new(connection.clone())),
            call_counts: Arc::new(SQLiteCallCountStore::new(connection)),
        })
    }

    /// Stores that keep everything in process memory.
    pub fn in_memory() -> Self {
        Self {
            grocery_lists: Arc::new(InMemoryGroceryListStore::default()),
            call_counts: Arc::new(InMemoryCallCountStore::default()),
        }
    }
}
