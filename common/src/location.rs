//! Location related module
//!
//! A `GeoLocation` is a latitude/longitude pair in degrees, as returned by the geocoding
//! provider (`{"lat": …, "lng": …}`) or taken from a facility's fixed position.
//!
//! Distances are great-circle distances computed with the haversine formula on a sphere of
//! radius `EARTH_RADIUS_KM`.
//!

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Mean Earth radius in km
pub const EARTH_RADIUS_KM: f64 = 6371.;

/// Actual location
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl GeoLocation {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both coordinates are finite and within their range.
    ///
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90. ..=90.).contains(&self.lat)
            && (-180. ..=180.).contains(&self.lng)
    }

    /// Great-circle distance to `other`, in km.
    ///
    pub fn distance_to(&self, other: &GeoLocation) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.).sin().powi(2);

        // Rounding can push `a` slightly past 1 for antipodal points
        let a = a.clamp(0., 1.);
        let c = 2. * a.sqrt().atan2((1. - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

impl Display for GeoLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.7}, {:.7}", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for GeoLocation {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Haversine distance in km between two possibly missing locations.
///
/// A missing location yields 0 instead of an error.
///
#[inline]
pub fn haversine(from: Option<&GeoLocation>, to: Option<&GeoLocation>) -> f64 {
    match (from, to) {
        (Some(from), Some(to)) => from.distance_to(to),
        _ => 0.,
    }
}
