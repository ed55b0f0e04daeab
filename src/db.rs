//! Sets up the application's SQLite database.

use rusqlite::{Connection, TransactionBehavior, Transaction as SqlTransaction};

use crate::stores::{create_call_count_table, create_grocery_list_table};

/// Create the tables for the domain models if they do not exist.
///
/// # Errors
/// Returns an error if there is an SQL error. No tables are created in that
/// case.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_grocery_list_table(&transaction)?;
    create_call_count_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
