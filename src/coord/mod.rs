mod viewport;

pub use viewport::ViewportBounds;

use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Trait for types that can provide lng/lat coordinates.
///
/// Implemented for `(f64, f64)` tuples (in `(lng, lat)` order) and
/// `geo_types::Point<f64>`. This allows functions to accept either type.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

/// A point-located record to be binned, e.g. a single 311 service request.
///
/// Either coordinate may be missing. Such points never contribute to a count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Opaque record identity (the service request id).
    pub id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeoPoint {
    pub fn new(id: impl Into<String>, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
        }
    }

    /// Shorthand for a point with both coordinates present.
    pub fn at(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self::new(id, Some(latitude), Some(longitude))
    }

    /// Returns `(lat, lng)` when both coordinates are usable.
    ///
    /// Missing, non-finite and exactly-zero values count as absent; upstream
    /// feeds use `0` for "no location".
    pub fn lat_lng(&self) -> Option<(f64, f64)> {
        let usable = |v: f64| v.is_finite() && v != 0.0;
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if usable(lat) && usable(lng) => Some((lat, lng)),
            _ => None,
        }
    }
}
