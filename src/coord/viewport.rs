use geo_types::{LineString, Polygon, coord};
use serde::{Deserialize, Serialize};

/// The rectangular area currently visible on the map, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl ViewportBounds {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// True when the bounds enclose no area (inverted, flat or non-finite).
    pub fn is_degenerate(&self) -> bool {
        let finite = [self.north, self.south, self.east, self.west]
            .iter()
            .all(|v| v.is_finite());
        !finite || self.north <= self.south || self.east <= self.west
    }

    /// Closed rectangle ring starting at the north-west corner, clockwise.
    pub fn to_polygon(&self) -> Polygon<f64> {
        let ring = LineString::from(vec![
            coord! { x: self.west, y: self.north },
            coord! { x: self.east, y: self.north },
            coord! { x: self.east, y: self.south },
            coord! { x: self.west, y: self.south },
            coord! { x: self.west, y: self.north },
        ]);
        Polygon::new(ring, vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_polygon_is_closed_rectangle() {
        let bounds = ViewportBounds::new(37.811749, 37.708075, -122.346582, -122.513272);
        let poly = bounds.to_polygon();
        let coords: Vec<_> = poly.exterior().coords().collect();

        assert_eq!(coords.len(), 5);
        assert_eq!(coords[0], coords[4]);
        assert_eq!(coords[0].x, -122.513272);
        assert_eq!(coords[0].y, 37.811749);
    }

    #[test]
    fn test_degenerate_bounds() {
        assert!(!ViewportBounds::new(38.0, 37.0, -122.0, -123.0).is_degenerate());
        assert!(ViewportBounds::new(37.0, 38.0, -122.0, -123.0).is_degenerate());
        assert!(ViewportBounds::new(38.0, 37.0, -123.0, -122.0).is_degenerate());
        assert!(ViewportBounds::new(37.5, 37.5, -122.0, -123.0).is_degenerate());
        assert!(ViewportBounds::new(f64::NAN, 37.0, -122.0, -123.0).is_degenerate());
    }
}
