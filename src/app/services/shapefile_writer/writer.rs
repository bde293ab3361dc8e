//! Core Shapefile writer implementation
//!
//! Owns the GDAL dataset for the whole run. `finalize` closes it and
//! reports a failed close; dropping the writer on an error path still
//! closes the dataset, so the `.shp`/`.shx`/`.dbf` headers are flushed on
//! every exit path, including errors in the middle of the grid.

use crate::app::models::PointFeature;
use crate::app::services::converter::FeatureSink;
use crate::app::services::shapefile_writer::{
    progress::ProgressReporter,
    schema::{GEOMETRY_TYPE, add_wind_fields, destination_srs},
    utils::{format_bytes, layer_name_for, remove_shapefile, shapefile_size_bytes},
};
use crate::constants::{OGR_DRIVER_NAME, fields};
use crate::{Error, Result};

use gdal::vector::{FieldValue, LayerAccess, LayerOptions, ToGdal};
use gdal::{Dataset, DriverManager};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Statistics reported after the destination is closed
#[derive(Debug, Clone, Default, Serialize)]
pub struct WritingStats {
    pub output_path: PathBuf,
    pub layer_name: String,
    pub features_written: u64,
    pub bytes_written: u64,
}

impl WritingStats {
    pub fn summary(&self) -> String {
        format!(
            "{} points in layer '{}' ({})",
            self.features_written,
            self.layer_name,
            format_bytes(self.bytes_written)
        )
    }
}

/// Point Shapefile writer for wind features
pub struct ShapefileWriter {
    output_path: PathBuf,
    layer_name: String,
    dataset: Dataset,
    progress_reporter: ProgressReporter,
    features_written: u64,
}

impl ShapefileWriter {
    /// Create a new Shapefile with the wind schema under EPSG:4326
    ///
    /// An existing destination is refused unless `overwrite` is set, in
    /// which case all of its sidecar files are removed first.
    pub fn create(output_path: &Path, overwrite: bool) -> Result<Self> {
        info!("Creating Shapefile {}", output_path.display());

        if output_path.exists() {
            if !overwrite {
                return Err(Error::destination_exists(output_path));
            }
            let removed = remove_shapefile(output_path)?;
            info!("Overwriting existing Shapefile ({} files removed)", removed);
        }

        let driver = DriverManager::get_driver_by_name(OGR_DRIVER_NAME)
            .map_err(|e| Error::destination(format!("OGR driver '{}' unavailable", OGR_DRIVER_NAME), e))?;
        let mut dataset = driver.create_vector_only(output_path).map_err(|e| {
            Error::destination(format!("Cannot create {}", output_path.display()), e)
        })?;

        let srs = destination_srs()?;
        let layer_name = layer_name_for(output_path);
        {
            let layer = dataset
                .create_layer(LayerOptions {
                    name: &layer_name,
                    srs: Some(&srs),
                    ty: GEOMETRY_TYPE,
                    options: None,
                })
                .map_err(|e| Error::destination(format!("Cannot create layer '{}'", layer_name), e))?;
            add_wind_fields(&layer)?;
        }
        debug!("Layer '{}' created with {} fields", layer_name, fields::ALL.len());

        Ok(Self {
            output_path: output_path.to_path_buf(),
            layer_name,
            dataset,
            progress_reporter: ProgressReporter::disabled(),
            features_written: 0,
        })
    }

    /// Show a progress bar for the expected number of features
    pub fn setup_progress(&mut self, total_features: u64) {
        self.progress_reporter = ProgressReporter::new(total_features);
    }

    pub fn features_written(&self) -> u64 {
        self.features_written
    }

    /// Append one point feature to the layer
    pub fn write_feature(&mut self, feature: &PointFeature) -> Result<()> {
        let geometry = feature
            .to_point()
            .to_gdal()
            .map_err(|e| Error::destination("Cannot build point geometry", e))?;
        // NaN (masked) attributes are left unset, which the DBF stores as null
        let (names, values): (Vec<&str>, Vec<FieldValue>) = fields::ALL
            .iter()
            .zip(feature.attributes.as_array())
            .filter(|(_, value)| !value.is_nan())
            .map(|(name, value)| (*name, FieldValue::RealValue(value)))
            .unzip();

        let mut layer = self
            .dataset
            .layer(0)
            .map_err(|e| Error::destination("Destination layer unavailable", e))?;
        layer
            .create_feature_fields(geometry, &names, &values)
            .map_err(|e| {
                Error::destination(
                    format!("Cannot write feature #{}", self.features_written),
                    e,
                )
            })?;

        self.features_written += 1;
        self.progress_reporter.increment();
        Ok(())
    }

    /// Mark the progress bar as failed; the dataset is still closed on drop
    pub fn abandon(&mut self, error: &Error) {
        self.progress_reporter.finish_with_error(&error.to_string());
    }

    /// Close the dataset and report what was written
    pub fn finalize(self) -> Result<WritingStats> {
        let Self {
            output_path,
            layer_name,
            dataset,
            mut progress_reporter,
            features_written,
        } = self;

        info!("Finalizing Shapefile: {}", output_path.display());
        // Headers and the DBF record count are written on close
        if let Err(e) = dataset.close() {
            let err = Error::destination(format!("Cannot close {}", output_path.display()), e);
            progress_reporter.finish_with_error(&err.to_string());
            return Err(err);
        }
        progress_reporter.finish(features_written);

        let stats = WritingStats {
            bytes_written: shapefile_size_bytes(&output_path),
            output_path,
            layer_name,
            features_written,
        };
        info!("Wrote {}", stats.summary());
        Ok(stats)
    }
}

impl FeatureSink for ShapefileWriter {
    fn write_feature(&mut self, feature: &PointFeature) -> Result<()> {
        ShapefileWriter::write_feature(self, feature)
    }
}
