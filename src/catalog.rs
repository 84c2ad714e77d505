//! A read-only catalog of listings.

use std::path::PathBuf;

/// The catalog.
#[derive(Debug)]
pub struct Catalog {
    root: Option<PathBuf>,         // The root directory, None when held in memory.
    db_conn: rusqlite::Connection, // An sqlite connection.
}

mod add_data;
mod query;
mod root;
