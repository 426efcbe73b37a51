mod aggregate;
mod features;

pub use aggregate::{CellCounts, count_points, visible_cells};
pub use features::{BinnedFeature, BinnedFeatureCollection, build_features};

use crate::config::BinningConfig;
use crate::coord::{GeoPoint, ViewportBounds};
use crate::error::HexbinError;
use crate::grid::{GridCache, StaticGrid};
use crate::index::ResolutionSelector;
use h3o::Resolution;
use std::sync::LazyLock;
use tracing::trace;

/// Runs the binning pipeline for one [`BinningConfig`].
///
/// Owns the static grid cache for that config, so keep one binner around
/// rather than building one per call.
///
/// # Example
///
/// ```
/// use hexbin311::{GeoPoint, HexBinner, ViewportBounds};
///
/// let binner = HexBinner::default();
/// let points = vec![GeoPoint::at("req-1", 37.7749, -122.4194)];
/// let bounds = ViewportBounds::new(37.811749, 37.708075, -122.346582, -122.513272);
///
/// let bins = binner.bin(&points, &bounds, 11.0);
/// assert_eq!(bins.total_count(), 1);
/// ```
#[derive(Debug)]
pub struct HexBinner {
    config: BinningConfig,
    selector: ResolutionSelector,
    cache: GridCache,
}

impl Default for HexBinner {
    fn default() -> Self {
        Self {
            config: BinningConfig::san_francisco(),
            selector: ResolutionSelector::default(),
            cache: GridCache::new(),
        }
    }
}

impl HexBinner {
    pub fn new(config: BinningConfig) -> Result<Self, HexbinError> {
        let selector = config.validate()?;
        Ok(Self {
            config,
            selector,
            cache: GridCache::new(),
        })
    }

    pub fn config(&self) -> &BinningConfig {
        &self.config
    }

    pub fn cache(&self) -> &GridCache {
        &self.cache
    }

    pub fn resolution_for_zoom(&self, zoom: f64) -> Resolution {
        self.selector.select(zoom)
    }

    /// The static grid at `resolution`, generated on a cache miss.
    pub fn grid(&self, resolution: Resolution) -> StaticGrid {
        self.cache
            .get_or_build(resolution, || StaticGrid::generate(&self.config, resolution))
    }

    /// Bins `points` for the map view described by `bounds` and `zoom`.
    pub fn bin(
        &self,
        points: &[GeoPoint],
        bounds: &ViewportBounds,
        zoom: f64,
    ) -> BinnedFeatureCollection {
        self.bin_at_resolution(points, bounds, self.resolution_for_zoom(zoom))
    }

    /// Same as [`HexBinner::bin`] with the resolution picked by the caller.
    pub fn bin_at_resolution(
        &self,
        points: &[GeoPoint],
        bounds: &ViewportBounds,
        resolution: Resolution,
    ) -> BinnedFeatureCollection {
        let grid = self.grid(resolution);
        let visible = visible_cells(&grid, bounds);
        let counts = count_points(points, &visible, resolution);

        trace!(
            resolution = u8::from(resolution),
            grid = grid.len(),
            visible = visible.len(),
            points = points.len(),
            binned = counts.total(),
            "binned points"
        );

        build_features(&counts, resolution)
    }
}

static DEFAULT_BINNER: LazyLock<HexBinner> = LazyLock::new(HexBinner::default);

/// The process-wide binner for the built-in San Francisco config.
pub fn default_binner() -> &'static HexBinner {
    &DEFAULT_BINNER
}

/// Bins `points` with the process-wide San Francisco binner.
pub fn bin_points_to_hexagons(
    points: &[GeoPoint],
    bounds: &ViewportBounds,
    zoom: f64,
) -> BinnedFeatureCollection {
    default_binner().bin(points, bounds, zoom)
}
