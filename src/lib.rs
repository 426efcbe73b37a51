//! # hexbin311
//!
//! Bins point-located records (311 service requests) into H3 hexagons for a
//! density map. The grid is clipped to a fixed land area, narrowed to the map
//! viewport, and its resolution follows the map zoom.
//!
//! ### 1. `HexBinner` - the binning pipeline
//!
//! ```
//! use hexbin311::{GeoPoint, HexBinner, ViewportBounds};
//!
//! let binner = HexBinner::default();
//! let points = vec![
//!     GeoPoint::at("req-1", 37.7749, -122.4194),
//!     GeoPoint::new("req-2", None, None),
//! ];
//! let bounds = ViewportBounds::new(37.811749, 37.708075, -122.346582, -122.513272);
//!
//! let bins = binner.bin(&points, &bounds, 11.0);
//! assert_eq!(bins.total_count(), 1);
//! println!("{}", bins.to_geojson_string());
//! ```
//!
//! ### 2. `HexCell` - Single Cell Operations
//!
//! ```
//! use hexbin311::HexCell;
//!
//! # fn main() -> Result<(), hexbin311::HexbinError> {
//! let cell = HexCell::from_wgs84(&(-122.4194, 37.7749), 9)?;
//! println!("{}", cell.hex_id());
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Files in and out
//!
//! ```no_run
//! use hexbin311::{
//!     BinnedToGeoParquet, GeometryFormat, PointCsvConfig, ViewportBounds,
//!     bin_points_to_hexagons, read_points_csv, write_binned_csv,
//! };
//!
//! let points = read_points_csv("requests.csv", &PointCsvConfig::default()).unwrap();
//! let bounds = ViewportBounds::new(37.811749, 37.708075, -122.346582, -122.513272);
//! let bins = bin_points_to_hexagons(&points, &bounds, 12.0);
//!
//! write_binned_csv(&bins.features, "bins.csv", Some(GeometryFormat::Wkt)).unwrap();
//! bins.to_geoparquet("bins.parquet").unwrap();
//! ```

pub mod binning;
pub mod cell;
pub mod config;
pub mod coord;
pub mod error;
pub mod geom;
pub mod grid;
pub mod index;
pub mod io;

pub use binning::{
    BinnedFeature, BinnedFeatureCollection, CellCounts, HexBinner, bin_points_to_hexagons,
    build_features, count_points, default_binner, visible_cells,
};
pub use cell::HexCell;
pub use config::{BinningConfig, SeedPoint};
pub use coord::{Coordinate, GeoPoint, ViewportBounds};
pub use error::HexbinError;
pub use geom::{parse_area, parse_geojson, parse_geometry, parse_wkt};
pub use grid::{GridCache, StaticGrid};
pub use index::{
    DEFAULT_RING_RADIUS, ResolutionSelector, ResolutionStep, cell_to_polygon, lat_lng_to_cell,
    resolution_for_zoom,
};
pub use io::{
    BinnedToArrow, BinnedToGeoParquet, CsvToPoints, GeometryFormat, PointCsvConfig,
    read_points_csv, write_binned_csv, write_geoparquet,
};

pub use geo_types;
pub use geojson;
pub use h3o;
