//! Database operations for items and their category associations.
//!
//! Every write touches both `items` and `item_categories`, so each one runs in
//! a transaction. If any statement fails the transaction is dropped without
//! committing, which rolls it back, and the error is returned as
//! [Error::PersistenceFailure].

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    category::CategoryId,
    item::{CategoryRef, Item, ItemId, ItemListing, NewItem},
    validation::EscapedText,
};

/// Create an item and associate it with each category in `category_ids`.
///
/// Returns the ID of the new item.
pub fn create_item(
    item: NewItem,
    category_ids: &[CategoryId],
    connection: &Connection,
) -> Result<ItemId, Error> {
    let tx = connection
        .unchecked_transaction()
        .map_err(Error::PersistenceFailure)?;

    tx.execute(
        "INSERT INTO items (name, description, price, amount) VALUES (?1, ?2, ?3, ?4)",
        (&item.name, &item.description, item.price, item.amount),
    )
    .map_err(Error::PersistenceFailure)?;

    let item_id = tx.last_insert_rowid();

    insert_item_categories(item_id, category_ids, &tx).map_err(Error::PersistenceFailure)?;

    tx.commit().map_err(Error::PersistenceFailure)?;

    Ok(item_id)
}

/// Overwrite an item's fields and replace its categories with exactly `category_ids`.
///
/// # Errors
///
/// Returns [Error::ItemNotFound] if there is no item with `item_id`, in which
/// case nothing is changed.
pub fn update_item(
    item_id: ItemId,
    item: NewItem,
    category_ids: &[CategoryId],
    connection: &Connection,
) -> Result<(), Error> {
    let tx = connection
        .unchecked_transaction()
        .map_err(Error::PersistenceFailure)?;

    let rows_affected = tx
        .execute(
            "UPDATE items SET name = ?1, description = ?2, price = ?3, amount = ?4 WHERE id = ?5",
            (&item.name, &item.description, item.price, item.amount, item_id),
        )
        .map_err(Error::PersistenceFailure)?;

    if rows_affected == 0 {
        return Err(Error::ItemNotFound(item_id));
    }

    tx.execute("DELETE FROM item_categories WHERE item_id = ?1", [item_id])
        .map_err(Error::PersistenceFailure)?;

    insert_item_categories(item_id, category_ids, &tx).map_err(Error::PersistenceFailure)?;

    tx.commit().map_err(Error::PersistenceFailure)?;

    Ok(())
}

/// Delete an item's category associations and then the item itself.
///
/// Deleting an item that does not exist changes nothing.
pub fn delete_item(item_id: ItemId, connection: &Connection) -> Result<(), Error> {
    let tx = connection
        .unchecked_transaction()
        .map_err(Error::PersistenceFailure)?;

    tx.execute("DELETE FROM item_categories WHERE item_id = ?1", [item_id])
        .map_err(Error::PersistenceFailure)?;
    tx.execute("DELETE FROM items WHERE id = ?1", [item_id])
        .map_err(Error::PersistenceFailure)?;

    tx.commit().map_err(Error::PersistenceFailure)?;

    Ok(())
}

fn insert_item_categories(
    item_id: ItemId,
    category_ids: &[CategoryId],
    connection: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut stmt =
        connection.prepare("INSERT INTO item_categories (item_id, category_id) VALUES (?1, ?2)")?;

    for &category_id in category_ids {
        stmt.execute((item_id, category_id))?;
    }

    Ok(())
}

/// Retrieve an item and its categories, or `None` if there is no such item.
///
/// The categories are ordered by name.
pub fn get_item(item_id: ItemId, connection: &Connection) -> Result<Option<Item>, Error> {
    let item = connection
        .prepare("SELECT id, name, description, price, amount FROM items WHERE id = :id;")?
        .query_row(&[(":id", &item_id)], map_item_row)
        .optional()?;

    let Some(mut item) = item else {
        return Ok(None);
    };

    item.categories = connection
        .prepare(
            "SELECT c.id, c.name FROM categories c \
            INNER JOIN item_categories ic ON c.id = ic.category_id \
            WHERE ic.item_id = :item_id \
            ORDER BY c.name ASC, c.id ASC;",
        )?
        .query_map(&[(":item_id", &item_id)], |row| {
            Ok(CategoryRef {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(item))
}

/// Retrieve every item with the names of its categories, ordered by item name.
///
/// Items without categories have an empty category list.
pub fn get_all_items(connection: &Connection) -> Result<Vec<ItemListing>, Error> {
    let mut stmt = connection.prepare(
        "SELECT i.id, i.name, c.name FROM items i \
        LEFT JOIN item_categories ic ON i.id = ic.item_id \
        LEFT JOIN categories c ON ic.category_id = c.id \
        ORDER BY i.name ASC, i.id ASC, c.name ASC;",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, ItemId>(0)?,
            row.get::<_, EscapedText>(1)?,
            row.get::<_, Option<EscapedText>>(2)?,
        ))
    })?;

    let mut items: Vec<ItemListing> = Vec::new();

    for row in rows {
        let (id, name, category_name) = row?;

        if items.last().is_none_or(|last| last.id != id) {
            items.push(ItemListing {
                id,
                name,
                categories: Vec::new(),
            });
        }

        if let (Some(category_name), Some(item)) = (category_name, items.last_mut()) {
            item.categories.push(category_name);
        }
    }

    Ok(items)
}

/// The number of items in the catalog.
pub fn count_items(connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Initialize the item and item-category tables.
///
/// The category table must already exist.
pub fn create_item_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            price INTEGER NOT NULL,
            amount INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS item_categories (
            item_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            PRIMARY KEY (item_id, category_id),
            FOREIGN KEY(item_id) REFERENCES items(id),
            FOREIGN KEY(category_id) REFERENCES categories(id)
        );

        CREATE INDEX IF NOT EXISTS idx_item_categories_category_id
            ON item_categories(category_id);",
    )?;

    Ok(())
}

fn map_item_row(row: &Row) -> Result<Item, rusqlite::Error> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        amount: row.get(4)?,
        categories: Vec::new(),
    })
}

#[cfg(test)]
mod item_query_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;

    use crate::{
        Error,
        category::{
            Category, NewCategory, create_category, delete_category, get_all_categories,
            get_items_in_category,
        },
        item::{
            CategoryRef, Item, NewItem, count_items, create_item, delete_item, get_all_items,
            get_item, update_item,
        },
        test_utils::must_open_test_db,
        validation::{EscapedText, Price},
    };

    fn insert_category(name: &str, connection: &Connection) -> Category {
        create_category(
            NewCategory {
                name: EscapedText::new_unchecked(name),
                description: EscapedText::new_unchecked("desc1"),
            },
            connection,
        )
        .expect("Could not create test category")
    }

    fn new_item(name: &str) -> NewItem {
        NewItem {
            name: EscapedText::new_unchecked(name),
            description: EscapedText::new_unchecked("desc2"),
            price: Price::from_cents(299),
            amount: 50,
        }
    }

    fn category_ids(item: &Item) -> HashSet<i64> {
        item.categories.iter().map(|category| category.id).collect()
    }

    fn association_count(connection: &Connection) -> i64 {
        connection
            .query_row("SELECT COUNT(*) FROM item_categories", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn create_item_stores_exact_category_set() {
        let connection = must_open_test_db();
        let chocolate = insert_category("Chocolate", &connection);
        let gummies = insert_category("Gummies", &connection);
        insert_category("Hard Candies", &connection);

        let id = create_item(new_item("Bar"), &[gummies.id, chocolate.id], &connection)
            .expect("Could not create item");

        let item = get_item(id, &connection).unwrap().unwrap();
        assert_eq!(category_ids(&item), HashSet::from([chocolate.id, gummies.id]));
    }

    #[test]
    fn create_item_without_categories() {
        let connection = must_open_test_db();

        let id = create_item(new_item("Bar"), &[], &connection).expect("Could not create item");

        let item = get_item(id, &connection).unwrap().unwrap();
        assert!(item.categories.is_empty());
    }

    #[test]
    fn create_item_with_unknown_category_rolls_back() {
        let connection = must_open_test_db();
        let chocolate = insert_category("Chocolate", &connection);

        let result = create_item(new_item("Bar"), &[chocolate.id, 999], &connection);

        assert!(matches!(result, Err(Error::PersistenceFailure(_))));
        assert_eq!(count_items(&connection), Ok(0));
        assert_eq!(association_count(&connection), 0);
    }

    #[test]
    fn update_item_replaces_category_set() {
        let connection = must_open_test_db();
        let chocolate = insert_category("Chocolate", &connection);
        let gummies = insert_category("Gummies", &connection);
        let hard_candies = insert_category("Hard Candies", &connection);
        let id = create_item(new_item("Bar"), &[chocolate.id, gummies.id], &connection).unwrap();

        update_item(
            id,
            new_item("Bar"),
            &[gummies.id, hard_candies.id],
            &connection,
        )
        .expect("Could not update item");

        let item = get_item(id, &connection).unwrap().unwrap();
        assert_eq!(
            category_ids(&item),
            HashSet::from([gummies.id, hard_candies.id])
        );
        assert_eq!(association_count(&connection), 2);
    }

    #[test]
    fn update_item_overwrites_fields() {
        let connection = must_open_test_db();
        let id = create_item(new_item("Bar"), &[], &connection).unwrap();
        let updated = NewItem {
            name: EscapedText::new_unchecked("Big Bar"),
            description: EscapedText::new_unchecked("Bigger"),
            price: Price::from_cents(99_999),
            amount: 10_000,
        };

        update_item(id, updated, &[], &connection).expect("Could not update item");

        let item = get_item(id, &connection).unwrap().unwrap();
        assert_eq!(item.name.as_str(), "Big Bar");
        assert_eq!(item.description.as_str(), "Bigger");
        assert_eq!(item.price, Price::from_cents(99_999));
        assert_eq!(item.amount, 10_000);
    }

    #[test]
    fn update_missing_item_returns_not_found() {
        let connection = must_open_test_db();

        let result = update_item(42, new_item("Bar"), &[], &connection);

        assert_eq!(result, Err(Error::ItemNotFound(42)));
    }

    #[test]
    fn update_with_unknown_category_keeps_previous_state() {
        let connection = must_open_test_db();
        let chocolate = insert_category("Chocolate", &connection);
        let id = create_item(new_item("Bar"), &[chocolate.id], &connection).unwrap();

        let result = update_item(id, new_item("Renamed"), &[999], &connection);

        assert!(matches!(result, Err(Error::PersistenceFailure(_))));
        let item = get_item(id, &connection).unwrap().unwrap();
        assert_eq!(item.name.as_str(), "Bar");
        assert_eq!(category_ids(&item), HashSet::from([chocolate.id]));
    }

    #[test]
    fn delete_item_removes_row_and_associations() {
        let connection = must_open_test_db();
        let chocolate = insert_category("Chocolate", &connection);
        let id = create_item(new_item("Bar"), &[chocolate.id], &connection).unwrap();

        delete_item(id, &connection).expect("Could not delete item");

        assert_eq!(get_item(id, &connection), Ok(None));
        assert_eq!(association_count(&connection), 0);
        assert_eq!(get_items_in_category(chocolate.id, &connection), Ok(vec![]));
    }

    #[test]
    fn get_missing_item_returns_none() {
        let connection = must_open_test_db();

        assert_eq!(get_item(7, &connection), Ok(None));
    }

    #[test]
    fn get_all_items_groups_category_names() {
        let connection = must_open_test_db();
        let chocolate = insert_category("Chocolate", &connection);
        let gummies = insert_category("Gummies", &connection);
        let worms = create_item(new_item("Worms"), &[gummies.id], &connection).unwrap();
        let bar = create_item(new_item("Bar"), &[gummies.id, chocolate.id], &connection).unwrap();
        let plain = create_item(new_item("Plain"), &[], &connection).unwrap();

        let items = get_all_items(&connection).unwrap();

        let summary = items
            .iter()
            .map(|item| {
                (
                    item.id,
                    item.name.as_str(),
                    item.categories
                        .iter()
                        .map(|name| name.as_str())
                        .collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                (bar, "Bar", vec!["Chocolate", "Gummies"]),
                (plain, "Plain", vec![]),
                (worms, "Worms", vec!["Gummies"]),
            ]
        );
    }

    #[test]
    fn counts_items() {
        let connection = must_open_test_db();
        create_item(new_item("Bar"), &[], &connection).unwrap();
        create_item(new_item("Worms"), &[], &connection).unwrap();

        assert_eq!(count_items(&connection), Ok(2));
    }

    #[test]
    fn create_update_then_delete_category() {
        let connection = must_open_test_db();
        let chocolate = insert_category("Chocolate", &connection);
        assert_eq!(chocolate.id, 1);

        let item_id = create_item(new_item("Bar"), &[chocolate.id], &connection).unwrap();
        assert_eq!(item_id, 1);
        assert_eq!(
            get_item(item_id, &connection),
            Ok(Some(Item {
                id: 1,
                name: EscapedText::new_unchecked("Bar"),
                description: EscapedText::new_unchecked("desc2"),
                price: Price::from_cents(299),
                amount: 50,
                categories: vec![CategoryRef {
                    id: 1,
                    name: EscapedText::new_unchecked("Chocolate"),
                }],
            }))
        );

        update_item(item_id, new_item("Bar"), &[], &connection).unwrap();
        let item = get_item(item_id, &connection).unwrap().unwrap();
        assert!(item.categories.is_empty());

        delete_category(chocolate.id, &connection).expect("Could not delete category");
        assert!(
            get_all_categories(&connection)
                .unwrap()
                .iter()
                .all(|category| category.id != 1)
        );
    }

    #[test]
    fn category_with_items_survives_delete_attempt() {
        let connection = must_open_test_db();
        let chocolate = insert_category("Chocolate", &connection);
        let item_id = create_item(new_item("Bar"), &[chocolate.id], &connection).unwrap();

        let blocking_items = get_items_in_category(chocolate.id, &connection).unwrap();
        assert_eq!(blocking_items.len(), 1);
        assert!(delete_category(chocolate.id, &connection).is_err());

        assert_eq!(get_all_categories(&connection), Ok(vec![chocolate.clone()]));
        assert_eq!(
            category_ids(&get_item(item_id, &connection).unwrap().unwrap()),
            HashSet::from([chocolate.id])
        );
    }
}
