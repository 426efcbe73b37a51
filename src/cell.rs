use crate::coord::Coordinate;
use crate::error::HexbinError;
use crate::index::{cell_center, cell_to_polygon, lat_lng_to_cell, parse_hex_id, to_resolution};
use geo_types::{Point, Polygon};
use h3o::{CellIndex, Resolution};

/// A single hexagonal cell of the H3 grid.
///
/// # Example
///
/// ```
/// use hexbin311::HexCell;
///
/// # fn main() -> Result<(), hexbin311::HexbinError> {
/// // (lng, lat) order, like every other coordinate in this crate
/// let cell = HexCell::from_wgs84(&(-122.4194, 37.7749), 9)?;
/// println!("Cell ID: {}", cell.hex_id());
///
/// let polygon = cell.to_polygon();
/// assert_eq!(polygon.exterior().coords().count(), 7);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    /// H3 cell index
    pub id: CellIndex,
    /// Center point as `(lng, lat)`
    pub center: Point<f64>,
    /// Grid resolution (0-15), where higher values mean smaller cells
    pub resolution: Resolution,
}

impl From<CellIndex> for HexCell {
    fn from(id: CellIndex) -> Self {
        Self {
            id,
            center: cell_center(id),
            resolution: id.resolution(),
        }
    }
}

impl HexCell {
    /// Create a HexCell from its hex string identifier
    ///
    /// # Example
    /// ```
    /// use hexbin311::HexCell;
    ///
    /// # fn main() -> Result<(), hexbin311::HexbinError> {
    /// let cell = HexCell::from_wgs84(&(-122.4194, 37.7749), 8)?;
    /// let restored = HexCell::from_hex_id(&cell.hex_id())?;
    /// assert_eq!(cell, restored);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_hex_id(id: &str) -> Result<Self, HexbinError> {
        parse_hex_id(id).map(Self::from)
    }

    /// Create the HexCell containing a WGS84 `(lng, lat)` coordinate.
    pub fn from_wgs84(coord: &impl Coordinate, resolution: u8) -> Result<Self, HexbinError> {
        let resolution = to_resolution(resolution)?;
        lat_lng_to_cell(coord.y(), coord.x(), resolution).map(Self::from)
    }

    /// Textual identifier, the 15-character lowercase hex form.
    pub fn hex_id(&self) -> String {
        self.id.to_string()
    }

    pub fn longitude(&self) -> f64 {
        self.center.x()
    }

    pub fn latitude(&self) -> f64 {
        self.center.y()
    }

    /// Converts this cell to its boundary polygon.
    ///
    /// The ring is closed and in `(lng, lat)` order, ready for GeoJSON.
    pub fn to_polygon(&self) -> Polygon<f64> {
        cell_to_polygon(self.id)
    }
}
