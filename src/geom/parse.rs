use crate::error::HexbinError;
use geo_types::{Geometry, MultiPolygon};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, HexbinError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON string into a `geo_types::Geometry`.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, HexbinError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| HexbinError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => {
            Geometry::try_from(geom).map_err(|e| HexbinError::GeometryParseError(e.to_string()))
        }
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| HexbinError::GeometryParseError("Feature has no geometry".to_string()))
            .and_then(|g| {
                Geometry::try_from(g).map_err(|e| HexbinError::GeometryParseError(e.to_string()))
            }),
        GeoJson::FeatureCollection(_) => Err(HexbinError::GeometryParseError(
            "FeatureCollection not supported, use individual geometries".to_string(),
        )),
    }
}

/// Parses an area boundary given as WKT or GeoJSON.
///
/// Accepts `Polygon` and `MultiPolygon`; any other geometry is rejected.
pub fn parse_area(s: &str) -> Result<MultiPolygon<f64>, HexbinError> {
    match parse_geometry(s)? {
        Geometry::Polygon(poly) => Ok(MultiPolygon::new(vec![poly])),
        Geometry::MultiPolygon(mp) => Ok(mp),
        other => Err(HexbinError::GeometryParseError(format!(
            "Expected Polygon or MultiPolygon, got {}",
            geometry_kind(&other)
        ))),
    }
}

fn geometry_kind(geom: &Geometry<f64>) -> &'static str {
    match geom {
        Geometry::Point(_) => "Point",
        Geometry::LineString(_) => "LineString",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        _ => "unsupported geometry",
    }
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, HexbinError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| HexbinError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        HexbinError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SF_WKT: &str = "POLYGON((-122.513272 37.708075, -122.513272 37.811749, -122.346582 37.811749, -122.346582 37.708075, -122.513272 37.708075))";

    #[test]
    fn test_parse_geojson_point() -> Result<(), HexbinError> {
        let json = r#"{"type":"Point","coordinates":[-122.4194,37.7749]}"#;
        let geom = parse_geometry(json)?;
        match geom {
            Geometry::Point(pt) => {
                assert!((pt.x() - (-122.4194)).abs() < 0.001);
                assert!((pt.y() - 37.7749).abs() < 0.001);
            }
            _ => panic!("Expected Point"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_area_wkt_polygon() -> Result<(), HexbinError> {
        let area = parse_area(SF_WKT)?;
        assert_eq!(area.0.len(), 1);
        assert_eq!(area.0[0].exterior().coords().count(), 5);
        Ok(())
    }

    #[test]
    fn test_parse_area_geojson_feature() -> Result<(), HexbinError> {
        let json = r#"{"type":"Feature","properties":{},"geometry":{"type":"Polygon","coordinates":[[[-122.5,37.7],[-122.5,37.8],[-122.3,37.8],[-122.3,37.7],[-122.5,37.7]]]}}"#;
        let area = parse_area(json)?;
        assert_eq!(area.0.len(), 1);
        Ok(())
    }

    #[test]
    fn test_parse_area_multipolygon() -> Result<(), HexbinError> {
        let wkt = "MULTIPOLYGON(((0 0, 0 1, 1 1, 1 0, 0 0)),((2 2, 2 3, 3 3, 3 2, 2 2)))";
        let area = parse_area(wkt)?;
        assert_eq!(area.0.len(), 2);
        Ok(())
    }

    #[test]
    fn test_parse_area_rejects_linestring() {
        let result = parse_area("LINESTRING(-122.4 37.7, -122.3 37.8)");
        assert!(matches!(result, Err(HexbinError::GeometryParseError(_))));
    }

    #[test]
    fn test_feature_collection_rejected() {
        let json = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(parse_geometry(json).is_err());
    }
}
