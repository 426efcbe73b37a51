/// Error type for hexbin311 operations.
///
/// The binning pipeline itself never fails; these cover the fallible edges
/// (configuration, single-cell construction, file I/O).
#[derive(Debug, PartialEq)]
pub enum HexbinError {
    /// The resolution is outside the valid H3 range (0-15).
    InvalidResolution(u8),
    /// Latitude/longitude rejected by the hex index (e.g. NaN or infinite).
    InvalidCoordinate(String),
    /// The string is not a valid hex cell identifier.
    InvalidHexId(String),
    /// The binning configuration is inconsistent.
    InvalidConfig(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
}

impl std::fmt::Display for HexbinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HexbinError::InvalidResolution(r) => write!(f, "Invalid resolution: {}", r),
            HexbinError::InvalidCoordinate(msg) => write!(f, "Invalid coordinate: {}", msg),
            HexbinError::InvalidHexId(id) => write!(f, "Invalid hex id: {}", id),
            HexbinError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            HexbinError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
            HexbinError::IoError(msg) => write!(f, "IO error: {}", msg),
            HexbinError::CsvError(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for HexbinError {}
