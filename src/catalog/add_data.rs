use super::Catalog;

use crate::{errors::HomeGateErr, listing::Listing};

impl Catalog {
    /// Fill a freshly created catalog inside one transaction, a bad record rolls back every row.
    pub(super) fn load(
        &mut self,
        listings: impl IntoIterator<Item = Listing>,
    ) -> Result<(), HomeGateErr> {
        let tx = self.db_conn.transaction()?;

        let mut count = 0;
        for listing in listings {
            Self::add_listing(&tx, &listing)?;
            count += 1;
        }

        tx.commit()?;
        log::info!("loaded {} listings into the catalog", count);

        Ok(())
    }

    fn add_listing(db_conn: &rusqlite::Connection, listing: &Listing) -> Result<(), HomeGateErr> {
        let num_records: i64 = db_conn.query_row(
            "SELECT COUNT(*) FROM listings WHERE id = ?1",
            &[&listing.id],
            |row| row.get(0),
        )?;

        if num_records > 0 {
            return Err(HomeGateErr::DuplicateListing(listing.id.clone()));
        }

        db_conn.execute(
            "INSERT INTO listings (id, address, description, image, latitude, longitude)
                  VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            &[
                &listing.id as &dyn rusqlite::ToSql,
                &listing.address,
                &listing.description,
                &listing.image,
                &listing.coords.lat(),
                &listing.coords.lon(),
            ],
        )?;

        Ok(())
    }
}
