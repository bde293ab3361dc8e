//! Grid-to-point conversion
//!
//! Turns every cell of a Sentinel-1 OWI wind grid into one point feature.
//! Cells are visited row-major (outer loop over rows, inner over columns)
//! and appended to the destination in that order.

use crate::app::models::{GridShape, PointFeature, WindGrid};
use crate::app::services::grid_reader::NetCdfGridReader;
use crate::app::services::shapefile_writer::ShapefileWriter;
use crate::config::ConverterConfig;
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Destination for converted features
pub trait FeatureSink {
    fn write_feature(&mut self, feature: &PointFeature) -> Result<()>;
}

impl FeatureSink for Vec<PointFeature> {
    fn write_feature(&mut self, feature: &PointFeature) -> Result<()> {
        self.push(*feature);
        Ok(())
    }
}

/// Summary of a completed conversion
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub rows: usize,
    pub cols: usize,
    pub features_written: u64,
    pub masked_cells: usize,
    pub bytes_written: u64,
    pub processing_time: Duration,
}

impl ConversionStats {
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Features per second over the whole run
    pub fn throughput(&self) -> f64 {
        let secs = self.processing_time.as_secs_f64();
        if secs > 0.0 {
            self.features_written as f64 / secs
        } else {
            0.0
        }
    }
}

/// Converts an OWI NetCDF grid into a point Shapefile
#[derive(Debug, Clone, Default)]
pub struct GridToPointConverter {
    config: ConverterConfig,
}

impl GridToPointConverter {
    pub fn new(config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert `source_path` into a new Shapefile at `destination_path`
    ///
    /// The source is fully loaded and validated before the destination is
    /// created, so input errors never leave an output behind. Once writing
    /// has started the writer is closed on every exit path; a failure in
    /// the middle of the grid may leave a partial file.
    pub fn convert(&self, source_path: &Path, destination_path: &Path) -> Result<ConversionStats> {
        let start_time = Instant::now();
        info!(
            "Converting {} -> {}",
            source_path.display(),
            destination_path.display()
        );

        let grid = {
            let reader = NetCdfGridReader::open(source_path)?
                .with_fill_masking(self.config.mask_fill_values);
            debug!("Loading wind grid from {}", reader.path().display());
            reader.load_wind_grid(&self.config.variables, self.config.validate_shapes)?
        };
        let shape = grid.shape();

        let mut writer = ShapefileWriter::create(destination_path, self.config.overwrite)?;
        if self.config.show_progress {
            writer.setup_progress(shape.cell_count() as u64);
        }

        if let Err(e) = self.convert_grid(&grid, &mut writer) {
            writer.abandon(&e);
            return Err(e);
        }
        let writing_stats = writer.finalize()?;

        let stats = ConversionStats {
            source_path: source_path.to_path_buf(),
            destination_path: writing_stats.output_path,
            rows: shape.rows,
            cols: shape.cols,
            features_written: writing_stats.features_written,
            masked_cells: grid.masked_attribute_cells(),
            bytes_written: writing_stats.bytes_written,
            processing_time: start_time.elapsed(),
        };

        info!(
            "Converted {} grid into {} points in {:.2}s",
            shape,
            stats.features_written,
            stats.processing_time.as_secs_f64()
        );
        Ok(stats)
    }

    /// Emit one feature per cell of `grid` into `sink`, row-major
    pub fn convert_grid<S: FeatureSink>(&self, grid: &WindGrid, sink: &mut S) -> Result<u64> {
        let GridShape { rows, cols } = grid.shape();
        debug!("Emitting {} points", rows * cols);

        let mut written = 0u64;
        for row in 0..rows {
            for col in 0..cols {
                let feature = grid.feature_at(row, col)?;
                sink.write_feature(&feature)?;
                written += 1;
            }
        }
        Ok(written)
    }
}
