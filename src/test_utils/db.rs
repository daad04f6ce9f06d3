use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::db::initialize;

/// An in-memory database with every table created.
#[track_caller]
pub(crate) fn must_open_test_db() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize test database");

    connection
}

/// [must_open_test_db] wrapped the way handlers receive it.
#[track_caller]
pub(crate) fn must_open_shared_test_db() -> Arc<Mutex<Connection>> {
    Arc::new(Mutex::new(must_open_test_db()))
}
