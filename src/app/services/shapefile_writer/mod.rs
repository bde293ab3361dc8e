//! Point Shapefile writer for Sentinel-1 wind features
//!
//! This module creates ESRI Shapefiles through GDAL/OGR with a fixed
//! schema: Point geometry in EPSG:4326 and the four real-valued fields
//! `windspeed`, `winddir`, `ewindspeed` and `ewinddir`.
//!
//! # Architecture
//!
//! - [`schema`] - Field definitions, geometry type and spatial reference
//! - [`writer`] - Core `ShapefileWriter` implementation
//! - [`progress`] - Progress reporting during writing
//! - [`utils`] - Destination path and sidecar helpers
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use s1l2_to_shp::app::services::shapefile_writer::ShapefileWriter;
//! use s1l2_to_shp::{PointFeature, WindAttributes};
//!
//! # fn example() -> s1l2_to_shp::Result<()> {
//! let mut writer = ShapefileWriter::create(Path::new("wind.shp"), false)?;
//! writer.write_feature(&PointFeature {
//!     longitude: 21.0,
//!     latitude: 10.0,
//!     attributes: WindAttributes { windspeed: 6.0, winddir: 90.0, ewindspeed: 6.6, ewinddir: 99.0 },
//! })?;
//! let stats = writer.finalize()?;
//! println!("Wrote {} points", stats.features_written);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The [`ShapefileWriter`] owns a GDAL dataset handle and must be used from
//! a single thread.

pub mod progress;
pub mod schema;
pub mod utils;
pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use progress::ProgressReporter;
pub use schema::{FieldSpec, destination_srs, wind_fields};
pub use utils::destination_path;
pub use writer::{ShapefileWriter, WritingStats};
