//! Database bootstrapping for the catalog tables.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{category::create_category_table, item::create_item_tables};

/// Create the tables for the domain models if they do not exist yet.
///
/// Foreign key enforcement is switched on for `connection` so that every
/// row in `item_categories` refers to an existing item and category.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_item_tables(&transaction)?;

    transaction.commit()?;

    Ok(())
}
