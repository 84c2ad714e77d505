use std::path::{Path, PathBuf};

use super::Catalog;

use crate::{errors::HomeGateErr, listing::parse_listings, Listing};

const BUNDLED_HOMES: &str = include_str!("../../data/homes.json");

impl Catalog {
    pub(crate) const DB_FILE: &'static str = "catalog.db";

    /// Load the dataset that ships with the crate.
    pub fn bundled() -> Result<Self, HomeGateErr> {
        Self::from_json(BUNDLED_HOMES)
    }

    /// Load a JSON dataset into an in memory catalog.
    pub fn from_json(text: &str) -> Result<Self, HomeGateErr> {
        let listings = parse_listings(text)?;

        let db_conn = rusqlite::Connection::open_in_memory()?;
        db_conn.execute_batch(include_str!("root/create_index.sql"))?;

        let mut cat = Catalog {
            root: None,
            db_conn,
        };
        cat.load(listings)?;

        Ok(cat)
    }

    /// Initialize a new catalog on disk. Refuses to touch an existing one, and leaves nothing
    /// behind if any listing is rejected.
    pub fn create(
        root: &dyn AsRef<Path>,
        listings: impl IntoIterator<Item = Listing>,
    ) -> Result<Self, HomeGateErr> {
        let db_file = root.as_ref().join(Catalog::DB_FILE);
        let root = root.as_ref().to_path_buf();

        if db_file.exists() {
            return Err(HomeGateErr::CatalogExists(db_file));
        }

        std::fs::create_dir_all(&root)?;

        // Create and set up the catalog
        let db_conn = rusqlite::Connection::open_with_flags(
            &db_file,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE | rusqlite::OpenFlags::SQLITE_OPEN_CREATE,
        )?;

        let mut cat = Catalog {
            root: Some(root),
            db_conn,
        };

        let loaded = cat
            .db_conn
            .execute_batch(include_str!("root/create_index.sql"))
            .map_err(HomeGateErr::from)
            .and_then(|_| cat.load(listings));

        if let Err(err) = loaded {
            drop(cat);
            if let Err(rm_err) = std::fs::remove_file(&db_file) {
                log::warn!("could not remove {}: {}", db_file.display(), rm_err);
            }
            return Err(err);
        }

        Ok(cat)
    }

    /// Open an existing catalog. It is opened read only.
    pub fn connect(root: &dyn AsRef<Path>) -> Result<Self, HomeGateErr> {
        let db_file = root.as_ref().join(Catalog::DB_FILE);
        let root = root.as_ref().to_path_buf();

        let db_conn = rusqlite::Connection::open_with_flags(
            db_file,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        )?;

        Self::validate_db_structure(&db_conn)?;

        Ok(Catalog {
            root: Some(root),
            db_conn,
        })
    }

    /// Retrieve a path to the root, if the catalog lives on disk.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Path to the database file for a catalog rooted at `root`.
    pub fn db_file(root: &dyn AsRef<Path>) -> PathBuf {
        root.as_ref().join(Catalog::DB_FILE)
    }

    /// Validate the database structure is correct.
    fn validate_db_structure(db_conn: &rusqlite::Connection) -> Result<(), HomeGateErr> {
        let mut stmt =
            db_conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;

        let names: Vec<String> = stmt
            .query_map(rusqlite::NO_PARAMS, |row| row.get(0))?
            .collect::<Result<_, _>>()?;

        if names != ["listings"] {
            return Err(HomeGateErr::InvalidSchema);
        }

        Ok(())
    }
}
