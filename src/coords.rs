//! Latitude and longitude coordinates.

use std::{convert::TryFrom, f64::consts::PI, fmt};

use crate::errors::HomeGateErr;

/// Mean radius of the Earth in meters.
pub const EARTH_RADIUS_METERS: f64 = 6371e3;

/// The latitude and longitude, in degrees.
///
/// Always within `[-90, 90]` and `[-180, 180]`; there is no way to build one that isn't.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    lat: f64,
    lon: f64,
}

impl Coords {
    /// Create a new coordinate, checking the ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, HomeGateErr> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Ok(Coords { lat, lon })
        } else {
            Err(HomeGateErr::InvalidCoordinate { lat, lon })
        }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great circle distance in meters using the haversine formula on a sphere of radius
    /// `EARTH_RADIUS_METERS`.
    pub fn distance_to(&self, other: &Coords) -> f64 {
        let phi1 = to_radians(self.lat);
        let phi2 = to_radians(other.lat);
        let d_phi = to_radians(other.lat - self.lat);
        let d_lambda = to_radians(other.lon - self.lon);

        let a = (d_phi / 2.0).sin() * (d_phi / 2.0).sin()
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin() * (d_lambda / 2.0).sin();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }
}

// Evaluated as `deg * PI / 180`, in that order.
#[inline]
fn to_radians(degrees: f64) -> f64 {
    (degrees * PI) / 180.0
}

impl TryFrom<(f64, f64)> for Coords {
    type Error = HomeGateErr;

    fn try_from(pair: (f64, f64)) -> Result<Self, Self::Error> {
        Coords::new(pair.0, pair.1)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
