use crate::binning::aggregate::CellCounts;
use crate::cell::HexCell;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use h3o::Resolution;
use serde_json::json;

/// One hexagon of the density map together with its point count.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedFeature {
    pub cell: HexCell,
    pub count: u64,
}

impl BinnedFeature {
    /// GeoJSON feature with `count` and `hexId` properties and the cell's
    /// closed `(lng, lat)` boundary ring as geometry.
    pub fn to_geojson(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("count".to_string(), json!(self.count));
        properties.insert("hexId".to_string(), json!(self.cell.hex_id()));

        Feature {
            bbox: None,
            geometry: Some(Geometry::from(&self.cell.to_polygon())),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Output of one binning run: a feature per visible cell, zero counts included.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedFeatureCollection {
    pub resolution: Resolution,
    pub features: Vec<BinnedFeature>,
}

impl BinnedFeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BinnedFeature> {
        self.features.iter()
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> u64 {
        self.features.iter().map(|f| f.count).sum()
    }

    pub fn to_geojson(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.features.iter().map(BinnedFeature::to_geojson).collect(),
            foreign_members: None,
        }
    }

    /// Serialized `FeatureCollection` JSON.
    pub fn to_geojson_string(&self) -> String {
        self.to_geojson().to_string()
    }
}

impl From<&BinnedFeatureCollection> for FeatureCollection {
    fn from(collection: &BinnedFeatureCollection) -> Self {
        collection.to_geojson()
    }
}

/// Turns counts into features, keeping the order of `counts`.
pub fn build_features(counts: &CellCounts, resolution: Resolution) -> BinnedFeatureCollection {
    let features = counts
        .iter()
        .map(|(cell, count)| BinnedFeature {
            cell: HexCell::from(cell),
            count,
        })
        .collect();

    BinnedFeatureCollection {
        resolution,
        features,
    }
}
