use std::cmp::Ordering;

use super::Catalog;

use crate::{coords::Coords, errors::HomeGateErr, listing::Listing};

impl Catalog {
    /// Retrieve all the listings in the order they were loaded.
    pub fn listings(&self) -> Result<Vec<Listing>, HomeGateErr> {
        let mut stmt = self
            .db_conn
            .prepare(include_str!("query/retrieve_listings.sql"))?;

        let vals: Result<Vec<Listing>, HomeGateErr> = stmt
            .query_and_then(rusqlite::NO_PARAMS, Self::parse_row_to_listing)?
            .collect();

        vals
    }

    fn parse_row_to_listing(row: &rusqlite::Row) -> Result<Listing, HomeGateErr> {
        let id: String = row.get(0)?;
        let address: String = row.get(1)?;
        let description: String = row.get(2)?;
        let image: String = row.get(3)?;
        let lat: f64 = row.get(4)?;
        let lon: f64 = row.get(5)?;

        Listing::new(id, address, description, image, lat, lon)
    }

    /// Retrieve a single listing, `None` if the id is not in the catalog. A stored row that no
    /// longer parses is an error, not a miss.
    pub fn listing(&self, id: &str) -> Result<Option<Listing>, HomeGateErr> {
        let res = self
            .db_conn
            .query_row_and_then(
                "
                    SELECT
                         id,
                         address,
                         description,
                         image,
                         latitude,
                         longitude
                    FROM listings
                    WHERE id = ?1
                ",
                &[id],
                Self::parse_row_to_listing,
            );

        match res {
            Ok(listing) => Ok(Some(listing)),
            Err(HomeGateErr::Database(rusqlite::Error::QueryReturnedNoRows)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Like `listing`, but a missing id is an error.
    pub fn require(&self, id: &str) -> Result<Listing, HomeGateErr> {
        self.listing(id)?
            .ok_or_else(|| HomeGateErr::NotInCatalog(id.to_owned()))
    }

    /// Number of listings in the catalog.
    pub fn len(&self) -> Result<usize, HomeGateErr> {
        let num_records: i64 =
            self.db_conn
                .query_row("SELECT COUNT(*) FROM listings", rusqlite::NO_PARAMS, |row| {
                    row.get(0)
                })?;

        Ok(num_records as usize)
    }

    /// True if there are no listings.
    pub fn is_empty(&self) -> Result<bool, HomeGateErr> {
        self.len().map(|len| len == 0)
    }

    /// All the listings paired with their distance in meters from `here`, closest first.
    pub fn nearest(&self, here: &Coords) -> Result<Vec<(Listing, f64)>, HomeGateErr> {
        let mut vals: Vec<(Listing, f64)> = self
            .listings()?
            .into_iter()
            .map(|listing| {
                let distance = here.distance_to(&listing.coords);
                (listing, distance)
            })
            .collect();

        vals.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        Ok(vals)
    }
}
