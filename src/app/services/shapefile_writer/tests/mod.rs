//! Unit tests for the shapefile_writer module
//!
//! Shared helpers read written Shapefiles back through GDAL so tests
//! assert on what actually landed on disk.

pub mod utils_tests;

use crate::app::models::{PointFeature, WindAttributes};
use crate::constants::fields;
use gdal::Dataset;
use gdal::vector::LayerAccess;
use std::path::Path;

/// Contents of a written Shapefile in file order
pub struct ShapefileContents {
    pub field_names: Vec<String>,
    pub field_types: Vec<u32>,
    pub geometry_types: Vec<u32>,
    pub srs_wkt: Option<String>,
    pub features: Vec<PointFeature>,
}

/// Read every feature of the first layer
pub fn read_shapefile(path: &Path) -> ShapefileContents {
    let dataset = Dataset::open(path).unwrap();
    let mut layer = dataset.layer(0).unwrap();

    let field_names = layer.defn().fields().map(|field| field.name()).collect();
    let field_types = layer
        .defn()
        .fields()
        .map(|field| field.field_type())
        .collect();
    let srs_wkt = layer.spatial_ref().and_then(|srs| srs.to_wkt().ok());

    let mut geometry_types = Vec::new();
    let mut features = Vec::new();
    for feature in layer.features() {
        let geometry = feature.geometry().unwrap();
        geometry_types.push(geometry.geometry_type());
        let (x, y, _) = geometry.get_point(0);
        let [windspeed, winddir, ewindspeed, ewinddir] = fields::ALL.map(|name| {
            feature
                .field_as_double_by_name(name)
                .unwrap()
                .unwrap_or(f64::NAN)
        });
        features.push(PointFeature {
            longitude: x,
            latitude: y,
            attributes: WindAttributes {
                windspeed,
                winddir,
                ewindspeed,
                ewinddir,
            },
        });
    }

    ShapefileContents {
        field_names,
        field_types,
        geometry_types,
        srs_wkt,
        features,
    }
}

/// Raw values of one attribute field in file order (`None` for null)
pub fn read_field(path: &Path, name: &str) -> Vec<Option<f64>> {
    let dataset = Dataset::open(path).unwrap();
    let mut layer = dataset.layer(0).unwrap();
    layer
        .features()
        .map(|feature| feature.field_as_double_by_name(name).unwrap())
        .collect()
}

/// A feature with distinct values derived from an index
pub fn create_test_feature(index: usize) -> PointFeature {
    let i = index as f64;
    PointFeature {
        longitude: 2.0 + i * 0.5,
        latitude: 43.0 + i * 0.25,
        attributes: WindAttributes {
            windspeed: 4.0 + i,
            winddir: (i * 45.0) % 360.0,
            ewindspeed: 5.0 + i,
            ewinddir: (i * 45.0 + 10.0) % 360.0,
        },
    }
}
