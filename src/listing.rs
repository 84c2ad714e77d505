//! Homes for sale and the JSON records they are loaded from.

use serde::Deserialize;

use crate::{coords::Coords, errors::HomeGateErr};

/// Description of a home for sale and where it is.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub address: String,
    pub description: String,
    pub image: String,
    pub coords: Coords,
}

impl Listing {
    /// Create a listing from raw degrees, checking the id and coordinates.
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Result<Self, HomeGateErr> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(HomeGateErr::InvalidListingId(id));
        }

        Ok(Listing {
            id,
            address: address.into(),
            description: description.into(),
            image: image.into(),
            coords: Coords::new(lat, lon)?,
        })
    }
}

/// A listing as it appears in a JSON dataset.
#[derive(Debug, Deserialize)]
struct ListingRecord {
    id: RecordId,
    address: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
    latitude: f64,
    longitude: f64,
}

// Datasets in the wild use both "1" and 1 for ids.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordId {
    Text(String),
    Number(u64),
}

impl ListingRecord {
    fn into_listing(self) -> Result<Listing, HomeGateErr> {
        let id = match self.id {
            RecordId::Text(text) => text,
            RecordId::Number(num) => num.to_string(),
        };

        Listing::new(
            id,
            self.address,
            self.description,
            self.image,
            self.latitude,
            self.longitude,
        )
    }
}

/// Parse a JSON array of listing records.
pub(crate) fn parse_listings(text: &str) -> Result<Vec<Listing>, HomeGateErr> {
    let records: Vec<ListingRecord> = serde_json::from_str(text)?;

    records
        .into_iter()
        .map(ListingRecord::into_listing)
        .collect()
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_parse_listings() {
        let text = r#"[
            {
                "id": "1",
                "address": "123 Main St",
                "description": "Two bedrooms.",
                "image": "https://example.com/1.jpg",
                "latitude": 37.7749,
                "longitude": -122.4194
            },
            {
                "id": 2,
                "address": "9 Elm Ct",
                "latitude": 46.8721,
                "longitude": -113.994
            }
        ]"#;

        let listings = parse_listings(text).expect("parse failed");
        assert_eq!(listings.len(), 2);

        assert_eq!(listings[0].id, "1");
        assert_eq!(listings[0].address, "123 Main St");
        assert_eq!(listings[0].coords.lat(), 37.7749);
        assert_eq!(listings[0].coords.lon(), -122.4194);

        assert_eq!(listings[1].id, "2");
        assert_eq!(listings[1].description, "");
        assert_eq!(listings[1].image, "");
    }

    #[test]
    fn test_parse_rejects_bad_coordinates() {
        let text = r#"[{"id": "7", "address": "Nowhere", "latitude": 95.0, "longitude": 0.0}]"#;

        match parse_listings(text) {
            Err(HomeGateErr::InvalidCoordinate { lat, .. }) => assert_eq!(lat, 95.0),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_blank_id() {
        let text = r#"[{"id": "  ", "address": "Nowhere", "latitude": 0.0, "longitude": 0.0}]"#;
        assert!(matches!(
            parse_listings(text),
            Err(HomeGateErr::InvalidListingId(_))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            parse_listings("[{\"id\": 1"),
            Err(HomeGateErr::Json(_))
        ));
    }
}
