pub mod arrow;
pub mod csv;
pub mod parquet;

pub use self::arrow::BinnedToArrow;
pub use self::csv::{
    CsvToPoints, GeometryFormat, PointCsvConfig, read_points_csv, write_binned_csv,
};
pub use self::parquet::{BinnedToGeoParquet, write_geoparquet};
