//! Data models for grid-to-point conversion
//!
//! This module contains the in-memory representation of the Sentinel-1 OWI
//! grids and the point features produced from them.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Grid Structures
// =============================================================================

/// Extent of a 2D grid as (rows, columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major flat index, `None` when outside the grid
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A named 2D variable stored as a row-major flat buffer
///
/// Values have already been unpacked to `f64`; masked cells hold NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct GridVariable {
    pub name: String,
    pub shape: GridShape,
    values: Vec<f64>,
}

impl GridVariable {
    /// Create a grid variable, checking that the buffer matches the shape
    pub fn new(name: impl Into<String>, shape: GridShape, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if values.len() != shape.cell_count() {
            return Err(Error::invalid_grid(
                name,
                format!(
                    "buffer holds {} values but shape {} needs {}",
                    values.len(),
                    shape,
                    shape.cell_count()
                ),
            ));
        }

        Ok(Self {
            name,
            shape,
            values,
        })
    }

    /// Create a grid variable from nested rows (mainly for fixtures)
    pub fn from_rows(name: impl Into<String>, rows: &[Vec<f64>]) -> Result<Self> {
        let name = name.into();
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(Error::invalid_grid(name, "rows have differing lengths"));
        }
        let values = rows.iter().flatten().copied().collect();
        Self::new(name, GridShape::new(rows.len(), cols), values)
    }

    /// Value at (row, col) using this variable's own extent
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.shape
            .index(row, col)
            .map(|idx| self.values[idx])
            .ok_or_else(|| {
                Error::shape_mismatch(
                    self.name.clone(),
                    format!("a grid covering cell ({}, {})", row, col),
                    format!("extent {}", self.shape),
                )
            })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of NaN (masked) cells
    pub fn masked_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}

/// The six OWI variables describing one wind field
#[derive(Debug, Clone)]
pub struct WindGrid {
    pub latitude: GridVariable,
    pub longitude: GridVariable,
    pub wind_speed: GridVariable,
    pub wind_direction: GridVariable,
    pub ecmwf_wind_speed: GridVariable,
    pub ecmwf_wind_direction: GridVariable,
}

impl WindGrid {
    /// Iteration extent, taken from the latitude grid
    pub fn shape(&self) -> GridShape {
        self.latitude.shape
    }

    pub fn variables(&self) -> [&GridVariable; 6] {
        [
            &self.latitude,
            &self.longitude,
            &self.wind_speed,
            &self.wind_direction,
            &self.ecmwf_wind_speed,
            &self.ecmwf_wind_direction,
        ]
    }

    /// First variable whose extent differs from the latitude grid
    pub fn check_shapes(&self) -> Result<()> {
        let expected = self.shape();
        match self.variables().iter().find(|var| var.shape != expected) {
            Some(var) => Err(Error::shape_mismatch(var.name.clone(), expected, var.shape)),
            None => Ok(()),
        }
    }

    /// Build the point feature for cell (row, col)
    pub fn feature_at(&self, row: usize, col: usize) -> Result<PointFeature> {
        Ok(PointFeature {
            longitude: self.longitude.get(row, col)?,
            latitude: self.latitude.get(row, col)?,
            attributes: WindAttributes {
                windspeed: self.wind_speed.get(row, col)?,
                winddir: self.wind_direction.get(row, col)?,
                ewindspeed: self.ecmwf_wind_speed.get(row, col)?,
                ewinddir: self.ecmwf_wind_direction.get(row, col)?,
            },
        })
    }

    /// Masked cells across the four attribute grids
    pub fn masked_attribute_cells(&self) -> usize {
        [
            &self.wind_speed,
            &self.wind_direction,
            &self.ecmwf_wind_speed,
            &self.ecmwf_wind_direction,
        ]
        .iter()
        .map(|var| var.masked_count())
        .sum()
    }
}

// =============================================================================
// Output Features
// =============================================================================

/// Wind attributes attached to every point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindAttributes {
    pub windspeed: f64,
    pub winddir: f64,
    pub ewindspeed: f64,
    pub ewinddir: f64,
}

impl WindAttributes {
    /// Values in schema field order
    pub fn as_array(&self) -> [f64; 4] {
        [self.windspeed, self.winddir, self.ewindspeed, self.ewinddir]
    }
}

/// One output record: a WGS84 point and its wind attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    pub longitude: f64,
    pub latitude: f64,
    pub attributes: WindAttributes,
}

impl PointFeature {
    pub fn to_point(&self) -> geo_types::Point<f64> {
        geo_types::Point::new(self.longitude, self.latitude)
    }
}
