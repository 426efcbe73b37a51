use crate::binning::{BinnedFeature, BinnedFeatureCollection};
use crate::error::HexbinError;
use arrow_array::{Float64Array, RecordBatch, StringArray, UInt8Array, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting binned cells to Arrow arrays.
///
/// Implemented for `[BinnedFeature]` and [`BinnedFeatureCollection`].
pub trait BinnedToArrow {
    /// Converts cell centers to an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Converts cell boundaries to an Arrow PolygonArray.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Converts cells to a RecordBatch with hex_id, resolution, count,
    /// longitude, latitude, and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, HexbinError>;
}

impl BinnedToArrow for [BinnedFeature] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for feature in self {
            builder.push_point(Some(&feature.cell.center));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let polygons: Vec<_> = self
            .par_iter()
            .map(|f: &BinnedFeature| f.cell.to_polygon())
            .collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, HexbinError> {
        let polygon_array = self.to_arrow_polygons();
        let ids: StringArray = self.iter().map(|f| Some(f.cell.hex_id())).collect();
        let resolutions: UInt8Array = self
            .iter()
            .map(|f| Some(u8::from(f.cell.resolution)))
            .collect();
        let counts: UInt64Array = self.iter().map(|f| Some(f.count)).collect();
        let longitudes: Float64Array = self.iter().map(|f| Some(f.cell.longitude())).collect();
        let latitudes: Float64Array = self.iter().map(|f| Some(f.cell.latitude())).collect();

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("hex_id", DataType::Utf8, false),
            Field::new("resolution", DataType::UInt8, false),
            Field::new("count", DataType::UInt64, false),
            Field::new("longitude", DataType::Float64, false),
            Field::new("latitude", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(ids),
                Arc::new(resolutions),
                Arc::new(counts),
                Arc::new(longitudes),
                Arc::new(latitudes),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| HexbinError::IoError(e.to_string()))
    }
}

impl BinnedToArrow for BinnedFeatureCollection {
    fn to_arrow_points(&self) -> PointArray {
        self.features.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.features.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, HexbinError> {
        self.features.as_slice().to_record_batch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::HexBinner;
    use crate::coord::{GeoPoint, ViewportBounds};
    use arrow_array::Array;
    use geoarrow_array::GeoArrowArray;

    fn sample() -> BinnedFeatureCollection {
        let bounds = ViewportBounds::new(37.78, 37.77, -122.41, -122.43);
        let points = vec![GeoPoint::at("1", 37.7749, -122.4194)];
        HexBinner::default().bin(&points, &bounds, 11.0)
    }

    #[test]
    fn test_bins_to_arrow_points_and_polygons() {
        let bins = sample();
        assert!(!bins.is_empty());

        assert_eq!(bins.to_arrow_points().len(), bins.len());
        assert_eq!(bins.to_arrow_polygons().len(), bins.len());
    }

    #[test]
    fn test_bins_to_record_batch() -> Result<(), HexbinError> {
        let bins = sample();
        let batch = bins.to_record_batch()?;

        assert_eq!(batch.num_rows(), bins.len());
        assert_eq!(batch.num_columns(), 6);

        let counts = batch
            .column(2)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .ok_or_else(|| HexbinError::IoError("count column type".to_string()))?;
        let total: u64 = counts.iter().flatten().sum();
        assert_eq!(total, 1);
        assert_eq!(counts.null_count(), 0);
        Ok(())
    }

    #[test]
    fn test_empty_slice_to_record_batch() -> Result<(), HexbinError> {
        let empty: Vec<BinnedFeature> = Vec::new();
        let batch = empty.as_slice().to_record_batch()?;
        assert_eq!(batch.num_rows(), 0);
        Ok(())
    }
}
