use crate::config::BinningConfig;
use crate::index::{cell_to_polygon, lat_lng_to_cell};
use geo::Intersects;
use h3o::{CellIndex, Resolution};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, trace, warn};

/// The cells covering the configured land area at one resolution.
///
/// Cheap to clone; clones share the same cell list.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticGrid {
    resolution: Resolution,
    cells: Arc<[CellIndex]>,
}

impl StaticGrid {
    pub fn new(resolution: Resolution, cells: Vec<CellIndex>) -> Self {
        Self {
            resolution,
            cells: cells.into(),
        }
    }

    /// Builds the grid from scratch: flood-fill around every seed, then keep
    /// the cells whose boundary touches the land area.
    pub fn generate(config: &BinningConfig, resolution: Resolution) -> Self {
        let mut candidates = BTreeSet::new();

        for seed in &config.seed_points {
            let origin = match lat_lng_to_cell(seed.lat, seed.lng, resolution) {
                Ok(cell) => cell,
                Err(e) => {
                    warn!(lat = seed.lat, lng = seed.lng, "skipping seed point: {e}");
                    continue;
                }
            };
            candidates.extend(origin.grid_disk::<Vec<_>>(config.ring_radius));
        }

        let candidate_count = candidates.len();
        let cells: Vec<CellIndex> = candidates
            .into_iter()
            .filter(|&cell| cell_to_polygon(cell).intersects(&config.land_boundary))
            .collect();

        debug!(
            resolution = u8::from(resolution),
            candidates = candidate_count,
            kept = cells.len(),
            "generated static grid"
        );

        Self::new(resolution, cells)
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in ascending index order.
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellIndex> {
        self.cells.iter()
    }

    /// True when both grids share one cell allocation.
    pub fn ptr_eq(&self, other: &StaticGrid) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}

/// Holds the most recently built [`StaticGrid`].
///
/// Only one resolution is kept; asking for another one replaces it. The lock
/// is held while a grid is generated, so a caller never sees a grid built for
/// a different resolution.
#[derive(Debug, Default)]
pub struct GridCache {
    entry: Mutex<Option<StaticGrid>>,
    builds: AtomicUsize,
}

impl GridCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build<F>(&self, resolution: Resolution, build: F) -> StaticGrid
    where
        F: FnOnce() -> StaticGrid,
    {
        // Stored grids are immutable, so a poisoned lock still guards valid data.
        let mut entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(grid) = entry.as_ref().filter(|g| g.resolution == resolution) {
            trace!(resolution = u8::from(resolution), "static grid cache hit");
            return grid.clone();
        }
        if let Some(previous) = entry.as_ref() {
            debug!(
                evicted = u8::from(previous.resolution),
                requested = u8::from(resolution),
                "replacing cached static grid"
            );
        }

        let grid = build();
        self.builds.fetch_add(1, Ordering::Relaxed);
        *entry = Some(grid.clone());
        grid
    }

    /// Number of grids generated through this cache.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    pub fn cached_resolution(&self) -> Option<Resolution> {
        self.entry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|g| g.resolution)
    }
}
