//! Sentinel-1 L2 wind to Shapefile converter
//!
//! A Rust library for extracting ocean wind measurements from Sentinel-1
//! Level-2 OWI NetCDF products and writing them as ESRI Shapefile points.
//!
//! This library provides tools for:
//! - Reading the OWI latitude/longitude and wind grids as row-major buffers
//! - Unpacking CF-encoded values (fill values, scale factor, offset)
//! - Validating that all grids describe the same cells
//! - Writing one point feature per grid cell under EPSG:4326
//! - Comprehensive error handling with the offending variable or path

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod converter;
        pub mod grid_reader;
        pub mod shapefile_writer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{GridShape, GridVariable, PointFeature, WindAttributes, WindGrid};
pub use app::services::converter::{ConversionStats, FeatureSink, GridToPointConverter};
pub use config::{ConverterConfig, VariableNames};

use std::path::PathBuf;

/// Result type alias for the converter
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for grid-to-point conversion
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Source grid file could not be opened
    #[error("Cannot open source grid '{}': {message}", path.display())]
    SourceOpen { path: PathBuf, message: String },

    /// Required variable absent from the source
    #[error("Variable '{variable}' not found in '{}'", path.display())]
    MissingVariable { variable: String, path: PathBuf },

    /// Variable exists but is not a usable 2D grid
    #[error("Variable '{variable}' is not a valid grid: {reason}")]
    InvalidGrid { variable: String, reason: String },

    /// Variable extent differs from the latitude grid
    #[error("Shape mismatch for variable '{variable}': expected {expected}, found {found}")]
    ShapeMismatch {
        variable: String,
        expected: String,
        found: String,
    },

    /// Cell values could not be read as floating point
    #[error("Cannot convert values of '{variable}' to floating point: {message}")]
    TypeConversion { variable: String, message: String },

    /// Destination already exists and overwrite was not requested
    #[error("Destination already exists: {} (use --force to overwrite)", path.display())]
    DestinationExists { path: PathBuf },

    /// GDAL/OGR failure while creating or writing the destination
    #[error("Destination error: {message}")]
    Destination {
        message: String,
        #[source]
        source: gdal::errors::GdalError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a source open error
    pub fn source_open(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SourceOpen {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing variable error
    pub fn missing_variable(variable: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingVariable {
            variable: variable.into(),
            path: path.into(),
        }
    }

    /// Create an invalid grid error
    pub fn invalid_grid(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGrid {
            variable: variable.into(),
            reason: reason.into(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(
        variable: impl Into<String>,
        expected: impl std::fmt::Display,
        found: impl std::fmt::Display,
    ) -> Self {
        Self::ShapeMismatch {
            variable: variable.into(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Create a type conversion error
    pub fn type_conversion(variable: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TypeConversion {
            variable: variable.into(),
            message: message.into(),
        }
    }

    /// Create a destination exists error
    pub fn destination_exists(path: impl Into<PathBuf>) -> Self {
        Self::DestinationExists { path: path.into() }
    }

    /// Create a destination (GDAL) error
    pub fn destination(message: impl Into<String>, source: gdal::errors::GdalError) -> Self {
        Self::Destination {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the failure happened before anything was written
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::SourceOpen { .. }
                | Self::MissingVariable { .. }
                | Self::InvalidGrid { .. }
                | Self::ShapeMismatch { .. }
                | Self::TypeConversion { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
