use crate::error::HexbinError;
use geo_types::{LineString, Point, Polygon, coord};
use h3o::{CellIndex, LatLng, Resolution};

/// Validates a raw resolution level.
pub fn to_resolution(level: u8) -> Result<Resolution, HexbinError> {
    Resolution::try_from(level).map_err(|_| HexbinError::InvalidResolution(level))
}

/// Returns the cell containing `(lat, lng)` at the given resolution.
///
/// The same input always yields the same cell.
pub fn lat_lng_to_cell(
    lat: f64,
    lng: f64,
    resolution: Resolution,
) -> Result<CellIndex, HexbinError> {
    let ll = LatLng::new(lat, lng).map_err(|e| HexbinError::InvalidCoordinate(e.to_string()))?;
    Ok(ll.to_cell(resolution))
}

/// Boundary of a cell as a polygon in `(lng, lat)` order.
///
/// The exterior ring is closed, so a hexagon has 7 coordinates.
pub fn cell_to_polygon(cell: CellIndex) -> Polygon<f64> {
    let coords: Vec<_> = cell
        .boundary()
        .iter()
        .map(|ll| coord! { x: ll.lng(), y: ll.lat() })
        .collect();
    Polygon::new(LineString::from(coords), vec![])
}

/// Center of a cell as a `(lng, lat)` point.
pub fn cell_center(cell: CellIndex) -> Point<f64> {
    let ll = LatLng::from(cell);
    Point::new(ll.lng(), ll.lat())
}

/// Parses the 15-character hex form of a cell id.
pub fn parse_hex_id(id: &str) -> Result<CellIndex, HexbinError> {
    id.trim()
        .parse::<CellIndex>()
        .map_err(|_| HexbinError::InvalidHexId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_same_cell() -> Result<(), HexbinError> {
        let res = to_resolution(9)?;
        let a = lat_lng_to_cell(37.7749, -122.4194, res)?;
        let b = lat_lng_to_cell(37.7749, -122.4194, res)?;
        assert_eq!(a, b);
        assert_eq!(a.resolution(), res);
        Ok(())
    }

    #[test]
    fn test_invalid_resolution() {
        assert_eq!(to_resolution(16), Err(HexbinError::InvalidResolution(16)));
    }

    #[test]
    fn test_invalid_coordinate() -> Result<(), HexbinError> {
        let res = to_resolution(9)?;
        let result = lat_lng_to_cell(f64::NAN, -122.4194, res);
        assert!(matches!(result, Err(HexbinError::InvalidCoordinate(_))));
        Ok(())
    }

    #[test]
    fn test_cell_polygon_closed_and_contains_center() -> Result<(), HexbinError> {
        use geo::Contains;

        let cell = lat_lng_to_cell(37.7749, -122.4194, to_resolution(8)?)?;
        let polygon = cell_to_polygon(cell);
        let exterior = polygon.exterior();

        assert_eq!(exterior.coords().count(), 7);
        assert_eq!(exterior.0[0], exterior.0[6]);
        assert!(polygon.contains(&cell_center(cell)));
        Ok(())
    }

    #[test]
    fn test_parse_hex_id_roundtrip() -> Result<(), HexbinError> {
        let cell = lat_lng_to_cell(37.7749, -122.4194, to_resolution(10)?)?;
        let text = cell.to_string();
        assert_eq!(text.len(), 15);
        assert_eq!(parse_hex_id(&text)?, cell);
        assert!(parse_hex_id("not-a-cell").is_err());
        Ok(())
    }
}
