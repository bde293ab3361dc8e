//! NetCDF grid reader for Sentinel-1 L2 OWI products
//!
//! Opens the product with the native netcdf library (libnetcdf/HDF5) and
//! reads each requested variable in one call into a row-major `f64`
//! buffer. The file handle is dropped with the reader.

use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::{debug, info, warn};

use crate::app::models::{GridShape, GridVariable, WindGrid};
use crate::app::services::grid_reader::unpack::PackingInfo;
use crate::config::VariableNames;
use crate::{Error, Result};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints diagnostics even when the Rust side handles
/// the error (e.g. probing an optional attribute). Safe to call repeatedly;
/// only the first call has an effect.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and null handlers are a
        // documented way to disable automatic error output.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Read-only access to the grid variables of one NetCDF file
pub struct NetCdfGridReader {
    path: PathBuf,
    file: netcdf::File,
    mask_fill_values: bool,
}

impl NetCdfGridReader {
    /// Open a NetCDF file for reading
    pub fn open(path: &Path) -> Result<Self> {
        silence_hdf5_errors();

        if !path.exists() {
            return Err(Error::source_open(path, "file does not exist"));
        }

        let file = netcdf::open(path).map_err(|e| Error::source_open(path, e.to_string()))?;
        info!("Opened source grid {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            file,
            mask_fill_values: true,
        })
    }

    /// Enable or disable CF unpacking (enabled by default)
    pub fn with_fill_masking(mut self, mask: bool) -> Self {
        self.mask_fill_values = mask;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.file.variable(name).is_some()
    }

    fn variable(&self, name: &str) -> Result<netcdf::Variable<'_>> {
        self.file
            .variable(name)
            .ok_or_else(|| Error::missing_variable(name, &self.path))
    }

    /// Extent of a 2D variable
    pub fn variable_shape(&self, name: &str) -> Result<GridShape> {
        let var = self.variable(name)?;
        shape_of(name, &var)
    }

    /// Read a whole 2D variable as `f64`
    pub fn read_variable(&self, name: &str) -> Result<GridVariable> {
        let var = self.variable(name)?;
        let shape = shape_of(name, &var)?;

        let mut values: Vec<f64> = var
            .get_values(..)
            .map_err(|e| Error::type_conversion(name, e.to_string()))?;

        if self.mask_fill_values {
            let packing = PackingInfo::from_variable(&var);
            debug!("Unpacking {} with {:?}", name, packing);
            packing.unpack(&mut values);
        }

        debug!("Read {} ({} cells)", name, values.len());
        GridVariable::new(name, shape, values)
    }

    /// Load the six wind variables
    ///
    /// Latitude is read first and defines the iteration extent. With
    /// `validate_shapes` set, every other variable must match it exactly.
    pub fn load_wind_grid(&self, names: &VariableNames, validate_shapes: bool) -> Result<WindGrid> {
        let grid = WindGrid {
            latitude: self.read_variable(&names.latitude)?,
            longitude: self.read_variable(&names.longitude)?,
            wind_speed: self.read_variable(&names.wind_speed)?,
            wind_direction: self.read_variable(&names.wind_direction)?,
            ecmwf_wind_speed: self.read_variable(&names.ecmwf_wind_speed)?,
            ecmwf_wind_direction: self.read_variable(&names.ecmwf_wind_direction)?,
        };

        if validate_shapes {
            grid.check_shapes()?;
        } else if let Err(e) = grid.check_shapes() {
            warn!("Shape check disabled, continuing despite: {}", e);
        }

        let masked = grid.masked_attribute_cells();
        if masked > 0 {
            warn!(
                "{} attribute cells are masked and will be written as null",
                masked
            );
        }

        info!(
            "Loaded {} wind grid from {}",
            grid.shape(),
            self.path.display()
        );
        Ok(grid)
    }
}

fn shape_of(name: &str, var: &netcdf::Variable) -> Result<GridShape> {
    let dims = var.dimensions();
    if dims.len() != 2 {
        return Err(Error::invalid_grid(
            name,
            format!("expected 2 dimensions, found {}", dims.len()),
        ));
    }
    Ok(GridShape::new(dims[0].len(), dims[1].len()))
}
