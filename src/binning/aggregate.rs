use crate::coord::{GeoPoint, ViewportBounds};
use crate::grid::StaticGrid;
use crate::index::{cell_to_polygon, lat_lng_to_cell};
use geo::Intersects;
use h3o::{CellIndex, Resolution};
use std::collections::HashMap;

/// Cells of `grid` whose boundary intersects the viewport, in grid order.
///
/// Degenerate bounds (see [`ViewportBounds::is_degenerate`]) see nothing.
pub fn visible_cells(grid: &StaticGrid, bounds: &ViewportBounds) -> Vec<CellIndex> {
    if bounds.is_degenerate() {
        return Vec::new();
    }

    let viewport = bounds.to_polygon();
    grid.iter()
        .copied()
        .filter(|&cell| cell_to_polygon(cell).intersects(&viewport))
        .collect()
}

/// Per-cell point counts that remember the order cells were registered in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellCounts {
    order: Vec<CellIndex>,
    counts: HashMap<CellIndex, u64>,
}

impl CellCounts {
    /// Registers every cell with a count of zero. Repeated cells are ignored.
    pub fn with_cells(cells: impl IntoIterator<Item = CellIndex>) -> Self {
        let mut out = Self::default();
        for cell in cells {
            if out.counts.insert(cell, 0).is_none() {
                out.order.push(cell);
            }
        }
        out
    }

    /// Adds one to a registered cell. Unregistered cells are left out and
    /// `false` is returned.
    pub fn increment(&mut self, cell: CellIndex) -> bool {
        match self.counts.get_mut(&cell) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, cell: CellIndex) -> Option<u64> {
        self.counts.get(&cell).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(cell, count)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, u64)> + '_ {
        self.order
            .iter()
            .map(|cell| (*cell, self.counts.get(cell).copied().unwrap_or(0)))
    }
}

/// Counts `points` per visible cell at `resolution`.
///
/// Every visible cell is present, even with a zero count. Points without
/// usable coordinates, or landing outside the visible cells, are skipped.
pub fn count_points(
    points: &[GeoPoint],
    visible: &[CellIndex],
    resolution: Resolution,
) -> CellCounts {
    let mut counts = CellCounts::with_cells(visible.iter().copied());

    for point in points {
        let Some((lat, lng)) = point.lat_lng() else {
            continue;
        };
        if let Ok(cell) = lat_lng_to_cell(lat, lng, resolution) {
            counts.increment(cell);
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BinningConfig;

    fn sf_bounds() -> ViewportBounds {
        ViewportBounds::new(37.811749, 37.708075, -122.346582, -122.513272)
    }

    fn cell_at(lat: f64, lng: f64, resolution: Resolution) -> CellIndex {
        lat_lng_to_cell(lat, lng, resolution).expect("valid coordinate")
    }

    #[test]
    fn test_visible_cells_subset_in_grid_order() {
        let grid = StaticGrid::generate(&BinningConfig::san_francisco(), Resolution::Nine);
        let small = ViewportBounds::new(37.78, 37.77, -122.41, -122.43);

        let all = visible_cells(&grid, &sf_bounds());
        let some = visible_cells(&grid, &small);

        assert!(!some.is_empty());
        assert!(some.len() < all.len());
        let positions: Vec<usize> = some
            .iter()
            .map(|c| grid.cells().iter().position(|g| g == c).expect("cell from grid"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_visible_cells_degenerate_bounds() {
        let grid = StaticGrid::generate(&BinningConfig::san_francisco(), Resolution::Eight);
        let inverted = ViewportBounds::new(37.708075, 37.811749, -122.346582, -122.513272);
        assert!(visible_cells(&grid, &inverted).is_empty());
    }

    #[test]
    fn test_viewport_elsewhere_sees_nothing() {
        let grid = StaticGrid::generate(&BinningConfig::san_francisco(), Resolution::Eight);
        let london = ViewportBounds::new(51.6, 51.4, 0.1, -0.3);
        assert!(visible_cells(&grid, &london).is_empty());
    }

    #[test]
    fn test_cell_counts_keeps_registration_order() {
        let a = cell_at(37.7749, -122.4194, Resolution::Nine);
        let b = cell_at(37.789, -122.401, Resolution::Nine);
        let mut counts = CellCounts::with_cells([b, a, b]);

        assert_eq!(counts.len(), 2);
        assert!(counts.increment(a));
        assert!(counts.increment(a));
        assert!(!counts.increment(cell_at(37.799, -122.407, Resolution::Nine)));

        let pairs: Vec<_> = counts.iter().collect();
        assert_eq!(pairs, vec![(b, 0), (a, 2)]);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_count_points_skips_unusable_and_invisible() {
        let center = cell_at(37.7749, -122.4194, Resolution::Nine);
        let points = vec![
            GeoPoint::at("1", 37.7749, -122.4194),
            GeoPoint::at("2", 37.77491, -122.41941),
            GeoPoint::new("3", None, Some(-122.4194)),
            GeoPoint::new("4", None, None),
            GeoPoint::at("5", f64::NAN, -122.4194),
            // Oakland, outside the visible set
            GeoPoint::at("6", 37.8044, -122.2712),
        ];

        let counts = count_points(&points, &[center], Resolution::Nine);

        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(center), Some(2));
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_count_points_order_independent() {
        let grid = StaticGrid::generate(&BinningConfig::san_francisco(), Resolution::Eight);
        let visible = visible_cells(&grid, &sf_bounds());
        let mut points = vec![
            GeoPoint::at("1", 37.7749, -122.4194),
            GeoPoint::at("2", 37.7897, -122.3981),
            GeoPoint::at("3", 37.761, -122.435),
            GeoPoint::at("4", 37.7749, -122.4194),
        ];

        let forward = count_points(&points, &visible, Resolution::Eight);
        points.reverse();
        let backward = count_points(&points, &visible, Resolution::Eight);

        assert_eq!(forward, backward);
        assert_eq!(forward.total(), 4);
    }
}
