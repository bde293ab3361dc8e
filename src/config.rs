//! Configuration management and validation.
//!
//! Provides the conversion settings: which NetCDF variables feed the
//! output fields, how stored values are unpacked and how the destination
//! is created.

use crate::constants::{
    VAR_ECMWF_WIND_DIRECTION, VAR_ECMWF_WIND_SPEED, VAR_LATITUDE, VAR_LONGITUDE,
    VAR_WIND_DIRECTION, VAR_WIND_SPEED,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Names of the six source variables read from the grid file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableNames {
    pub latitude: String,
    pub longitude: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub ecmwf_wind_speed: String,
    pub ecmwf_wind_direction: String,
}

impl Default for VariableNames {
    fn default() -> Self {
        Self {
            latitude: VAR_LATITUDE.to_string(),
            longitude: VAR_LONGITUDE.to_string(),
            wind_speed: VAR_WIND_SPEED.to_string(),
            wind_direction: VAR_WIND_DIRECTION.to_string(),
            ecmwf_wind_speed: VAR_ECMWF_WIND_SPEED.to_string(),
            ecmwf_wind_direction: VAR_ECMWF_WIND_DIRECTION.to_string(),
        }
    }
}

impl VariableNames {
    /// All names in read order (latitude first, it defines the grid shape)
    pub fn all(&self) -> [&str; 6] {
        [
            &self.latitude,
            &self.longitude,
            &self.wind_speed,
            &self.wind_direction,
            &self.ecmwf_wind_speed,
            &self.ecmwf_wind_direction,
        ]
    }
}

/// Settings for a single grid-to-point conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Source variable names
    pub variables: VariableNames,

    /// Check all grids against the latitude shape before writing
    pub validate_shapes: bool,

    /// Apply `_FillValue` masking and `scale_factor`/`add_offset`
    pub mask_fill_values: bool,

    /// Replace an existing destination Shapefile
    pub overwrite: bool,

    /// Show a progress bar while writing features
    pub show_progress: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            variables: VariableNames::default(),
            validate_shapes: true,
            mask_fill_values: true,
            overwrite: false,
            show_progress: false,
        }
    }
}

impl ConverterConfig {
    /// Create configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom source variable names
    pub fn with_variables(mut self, variables: VariableNames) -> Self {
        self.variables = variables;
        self
    }

    /// Enable or disable up-front shape validation
    pub fn with_shape_validation(mut self, validate: bool) -> Self {
        self.validate_shapes = validate;
        self
    }

    /// Enable or disable CF unpacking of stored values
    pub fn with_fill_masking(mut self, mask: bool) -> Self {
        self.mask_fill_values = mask;
        self
    }

    /// Allow replacing an existing destination
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        let names = self.variables.all();

        if let Some(empty) = names.iter().position(|name| name.trim().is_empty()) {
            return Err(Error::configuration(format!(
                "Variable name #{} must not be empty",
                empty + 1
            )));
        }

        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                return Err(Error::configuration(format!(
                    "Variable '{}' is assigned to more than one field",
                    name
                )));
            }
        }

        Ok(())
    }
}
