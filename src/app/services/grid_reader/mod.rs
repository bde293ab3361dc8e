//! NetCDF grid reader for Sentinel-1 Level-2 OWI products
//!
//! Reads the latitude, longitude and wind grids of an OWI component into
//! flat row-major buffers ready for point extraction.
//!
//! ## Architecture
//!
//! - [`reader`] - File access, variable resolution and shape checks
//! - [`unpack`] - CF `_FillValue` / `scale_factor` / `add_offset` handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use s1l2_to_shp::app::services::grid_reader::NetCdfGridReader;
//! use s1l2_to_shp::VariableNames;
//!
//! # fn example() -> s1l2_to_shp::Result<()> {
//! let reader = NetCdfGridReader::open(std::path::Path::new("s1a-owi.nc"))?;
//! let grid = reader.load_wind_grid(&VariableNames::default(), true)?;
//! println!("{} cells", grid.shape().cell_count());
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod unpack;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use reader::{NetCdfGridReader, silence_hdf5_errors};
pub use unpack::PackingInfo;
