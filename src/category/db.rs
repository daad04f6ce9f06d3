//! Database operations for categories.
//!
//! Each write here is a single statement so none of them open a transaction.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    category::{Category, CategoryId, NewCategory},
    item::ItemSummary,
    validation::EscapedText,
};

/// Create a category and return it with its generated ID.
pub fn create_category(category: NewCategory, connection: &Connection) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO categories (name, description) VALUES (?1, ?2);",
        (&category.name, &category.description),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name: category.name,
        description: category.description,
    })
}

/// Retrieve a single category by ID, or `None` if there is no such category.
pub fn get_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Option<Category>, Error> {
    connection
        .prepare("SELECT id, name, description FROM categories WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Retrieve the oldest category whose stored name equals `name` exactly.
pub fn get_category_by_name(
    name: &EscapedText,
    connection: &Connection,
) -> Result<Option<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, description FROM categories WHERE name = :name \
            ORDER BY id ASC LIMIT 1;",
        )?
        .query_row(&[(":name", name.as_str())], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, description FROM categories ORDER BY name ASC, id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the name and description of a category.
///
/// Updating a category that does not exist changes nothing.
pub fn update_category(
    category_id: CategoryId,
    category: NewCategory,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE categories SET name = ?1, description = ?2 WHERE id = ?3",
        (&category.name, &category.description, category_id),
    )?;

    if rows_affected == 0 {
        tracing::debug!("update of category {category_id} matched no rows");
    }

    Ok(())
}

/// Delete a category by ID.
///
/// Callers must check [get_items_in_category] first: a category that items
/// still refer to is rejected by the foreign key on `item_categories`.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    connection.execute("DELETE FROM categories WHERE id = ?1", [category_id])?;

    Ok(())
}

/// Retrieve the items that belong to a category, ordered by name.
pub fn get_items_in_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Vec<ItemSummary>, Error> {
    connection
        .prepare(
            "SELECT i.id, i.name, i.description FROM items i \
            INNER JOIN item_categories ic ON i.id = ic.item_id \
            WHERE ic.category_id = :category_id \
            ORDER BY i.name ASC, i.id ASC;",
        )?
        .query_map(&[(":category_id", &category_id)], |row| {
            Ok(ItemSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        })?
        .map(|maybe_item| maybe_item.map_err(|error| error.into()))
        .collect()
}

/// The number of categories in the catalog.
pub fn count_categories(connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_categories_name ON categories(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}
