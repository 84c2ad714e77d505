//! Module for errors.
use thiserror::Error;

/// Error from the homegate interface.
#[derive(Debug, Error)]
pub enum HomeGateErr {
    // Inherited errors from std
    /// Error forwarded from std
    #[error("std lib io error: {0}")]
    IO(#[from] ::std::io::Error),

    // Other forwarded errors
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] ::rusqlite::Error),
    /// Error parsing a listing dataset.
    #[error("error parsing listing data: {0}")]
    Json(#[from] ::serde_json::Error),
    /// General error with any cause information erased and replaced by a string
    #[error("general error forwarded: {0}")]
    GeneralError(String),

    // My own errors from this crate
    /// Latitude or longitude out of range (or not a number).
    #[error("invalid coordinate: lat {lat}, lon {lon}")]
    InvalidCoordinate {
        /// Offending latitude in degrees.
        lat: f64,
        /// Offending longitude in degrees.
        lon: f64,
    },
    /// The database structure is wrong.
    #[error("invalid catalog format")]
    InvalidSchema,
    /// Listing id is empty or otherwise unusable.
    #[error("invalid listing id: {0}")]
    InvalidListingId(String),
    /// A catalog already exists where a new one was to be created.
    #[error("catalog already exists: {}", .0.display())]
    CatalogExists(::std::path::PathBuf),
    /// Two listings in one dataset share an id.
    #[error("duplicate listing id: {0}")]
    DuplicateListing(String),
    /// No listing with this id in the catalog.
    #[error("no listing with id {0} in the catalog")]
    NotInCatalog(String),
    /// The location provider could not produce an answer.
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),
    /// A one-shot request did not finish in time.
    #[error("timed out waiting for {0}")]
    Timeout(&'static str),
    /// The notification sink rejected a notification.
    #[error("notification failed: {0}")]
    NotificationFailed(String),
    /// Unlock requested while the user is not close enough.
    #[error("unlock is not available for this listing")]
    UnlockUnavailable,
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
