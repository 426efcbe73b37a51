use crate::error::HexbinError;
use crate::geom::parse_area;
use crate::index::{
    DEFAULT_FINEST_RESOLUTION, DEFAULT_RING_RADIUS, ResolutionSelector, ResolutionStep,
    SF_LAND_BOUNDARY, SF_SEED_POINTS, default_resolution_steps,
};
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A flood-fill starting location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeedPoint {
    pub lat: f64,
    pub lng: f64,
}

impl SeedPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Everything that shapes the static grid and the zoom table.
///
/// The default is the San Francisco setup the dashboard ships with.
///
/// # Example
/// ```
/// use hexbin311::{BinningConfig, SeedPoint};
///
/// let config = BinningConfig::san_francisco()
///     .ring_radius(10)
///     .seed_points(vec![SeedPoint::new(37.7749, -122.4194)]);
/// assert_eq!(config.ring_radius, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BinningConfig {
    /// Land area the grid is clipped to, in `(lng, lat)` order
    pub land_boundary: MultiPolygon<f64>,
    pub seed_points: Vec<SeedPoint>,
    /// Ring distance of the flood fill around each seed cell
    pub ring_radius: u32,
    pub resolution_steps: Vec<ResolutionStep>,
    /// Resolution used for zooms above the last step
    pub finest_resolution: u8,
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self::san_francisco()
    }
}

/// On-disk shape of [`BinningConfig`]; absent fields fall back to the defaults.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    /// WKT or GeoJSON
    land_boundary: Option<String>,
    seed_points: Option<Vec<SeedPoint>>,
    ring_radius: Option<u32>,
    resolution_steps: Option<Vec<ResolutionStep>>,
    finest_resolution: Option<u8>,
}

impl BinningConfig {
    pub fn san_francisco() -> Self {
        let ring: Vec<Coord<f64>> = SF_LAND_BOUNDARY
            .iter()
            .map(|&(x, y)| Coord { x, y })
            .collect();
        let seeds = SF_SEED_POINTS
            .iter()
            .map(|&(lat, lng)| SeedPoint::new(lat, lng))
            .collect();

        Self {
            land_boundary: MultiPolygon::new(vec![Polygon::new(LineString::from(ring), vec![])]),
            seed_points: seeds,
            ring_radius: DEFAULT_RING_RADIUS,
            resolution_steps: default_resolution_steps(),
            finest_resolution: DEFAULT_FINEST_RESOLUTION,
        }
    }

    /// Loads a config from JSON, e.g.
    ///
    /// ```json
    /// { "land_boundary": "POLYGON((...))", "ring_radius": 20,
    ///   "seed_points": [{ "lat": 37.77, "lng": -122.42 }] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, HexbinError> {
        let file: ConfigFile = serde_json::from_str(json)
            .map_err(|e| HexbinError::InvalidConfig(e.to_string()))?;

        let mut config = Self::default();
        if let Some(boundary) = file.land_boundary {
            config.land_boundary = parse_area(&boundary)?;
        }
        if let Some(seeds) = file.seed_points {
            config.seed_points = seeds;
        }
        if let Some(radius) = file.ring_radius {
            config.ring_radius = radius;
        }
        if let Some(steps) = file.resolution_steps {
            config.resolution_steps = steps;
        }
        if let Some(finest) = file.finest_resolution {
            config.finest_resolution = finest;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HexbinError> {
        let json =
            std::fs::read_to_string(path).map_err(|e| HexbinError::IoError(e.to_string()))?;
        Self::from_json(&json)
    }

    pub fn land_boundary(mut self, boundary: MultiPolygon<f64>) -> Self {
        self.land_boundary = boundary;
        self
    }

    pub fn seed_points(mut self, seeds: Vec<SeedPoint>) -> Self {
        self.seed_points = seeds;
        self
    }

    pub fn ring_radius(mut self, radius: u32) -> Self {
        self.ring_radius = radius;
        self
    }

    pub fn resolution_steps(mut self, steps: Vec<ResolutionStep>, finest: u8) -> Self {
        self.resolution_steps = steps;
        self.finest_resolution = finest;
        self
    }

    /// Checks the config and builds its resolution selector.
    pub fn validate(&self) -> Result<ResolutionSelector, HexbinError> {
        if self.seed_points.is_empty() {
            return Err(HexbinError::InvalidConfig(
                "at least one seed point is required".to_string(),
            ));
        }
        if self.land_boundary.0.is_empty() {
            return Err(HexbinError::InvalidConfig(
                "land boundary has no polygons".to_string(),
            ));
        }
        ResolutionSelector::new(&self.resolution_steps, self.finest_resolution)
    }
}
