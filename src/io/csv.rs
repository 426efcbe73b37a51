use crate::binning::BinnedFeature;
use crate::coord::GeoPoint;
use crate::error::HexbinError;
use std::fs::File;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Column layout of a point CSV.
///
/// The default matches the service-request export: `service_request_id`,
/// `lat`, `long`.
#[derive(Debug, Clone)]
pub struct PointCsvConfig {
    pub lat_column: String,
    pub lng_column: String,
    /// Row number is used as the id when unset
    pub id_column: Option<String>,
}

impl Default for PointCsvConfig {
    fn default() -> Self {
        Self::new("lat", "long").id_column("service_request_id")
    }
}

impl PointCsvConfig {
    /// # Example
    /// ```
    /// use hexbin311::PointCsvConfig;
    ///
    /// let config = PointCsvConfig::new("Latitude", "Longitude").id_column("ID");
    /// ```
    pub fn new(lat_column: impl Into<String>, lng_column: impl Into<String>) -> Self {
        Self {
            lat_column: lat_column.into(),
            lng_column: lng_column.into(),
            id_column: None,
        }
    }

    pub fn id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }
}

pub trait CsvToPoints {
    fn read_points(&self, config: &PointCsvConfig) -> Result<Vec<GeoPoint>, HexbinError>;
}

impl<P: AsRef<Path>> CsvToPoints for P {
    fn read_points(&self, config: &PointCsvConfig) -> Result<Vec<GeoPoint>, HexbinError> {
        read_points_csv(self, config)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, HexbinError> {
    if name.is_empty() {
        return Err(HexbinError::CsvError("Column name cannot be empty".to_string()));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| HexbinError::CsvError(format!("Column '{}' not found", name)))
}

/// Empty cells are missing values; unparseable ones are logged and treated as missing.
fn parse_optional(record: &csv::StringRecord, idx: usize, row: usize) -> Option<f64> {
    let raw = record.get(idx)?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(row, value = raw, "unparseable coordinate, treating as missing");
            None
        }
    }
}

/// Reads points from a CSV file.
///
/// Rows with missing or broken coordinates are kept as points without a
/// location; the binner skips them later.
///
/// ```no_run
/// use hexbin311::{PointCsvConfig, read_points_csv};
///
/// let points = read_points_csv("service_requests.csv", &PointCsvConfig::default()).unwrap();
/// ```
pub fn read_points_csv(
    csv_path: impl AsRef<Path>,
    config: &PointCsvConfig,
) -> Result<Vec<GeoPoint>, HexbinError> {
    let file = File::open(csv_path).map_err(|e| HexbinError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| HexbinError::CsvError(e.to_string()))?
        .clone();

    let lat_idx = column_index(&headers, &config.lat_column)?;
    let lng_idx = column_index(&headers, &config.lng_column)?;
    let id_idx = config
        .id_column
        .as_deref()
        .map(|c| column_index(&headers, c))
        .transpose()?;

    let mut points = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| HexbinError::CsvError(e.to_string()))?;

        let id = match id_idx {
            Some(idx) => record.get(idx).unwrap_or_default().to_string(),
            None => row.to_string(),
        };
        points.push(GeoPoint::new(
            id,
            parse_optional(&record, lat_idx, row),
            parse_optional(&record, lng_idx, row),
        ));
    }

    Ok(points)
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

/// Writes binned cells as `hex_id,count,resolution[,hex_geometry]` rows.
pub fn write_binned_csv(
    features: &[BinnedFeature],
    output_path: impl AsRef<Path>,
    geometry: Option<GeometryFormat>,
) -> Result<(), HexbinError> {
    let out_file = File::create(output_path).map_err(|e| HexbinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row = vec!["hex_id", "count", "resolution"];
    if geometry.is_some() {
        header_row.push("hex_geometry");
    }
    writer
        .write_record(&header_row)
        .map_err(|e| HexbinError::CsvError(e.to_string()))?;

    for feature in features {
        let mut row = vec![
            feature.cell.hex_id(),
            feature.count.to_string(),
            u8::from(feature.cell.resolution).to_string(),
        ];

        if let Some(format) = geometry {
            let polygon = feature.cell.to_polygon();
            row.push(match format {
                GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
            });
        }

        writer
            .write_record(&row)
            .map_err(|e| HexbinError::CsvError(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| HexbinError::CsvError(e.to_string()))?;

    Ok(())
}
