//! Command-line argument definitions for the Sentinel-1 wind converter
//!
//! Two positional arguments mirror the classic invocation
//! `s1l2-to-shp <SOURCE> <OUTPUT_BASE>`; everything else is optional.

use crate::app::services::shapefile_writer::destination_path;
use crate::config::{ConverterConfig, VariableNames};
use crate::constants::{
    VAR_ECMWF_WIND_DIRECTION, VAR_ECMWF_WIND_SPEED, VAR_LATITUDE, VAR_LONGITUDE,
    VAR_WIND_DIRECTION, VAR_WIND_SPEED,
};
use crate::{Error, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the Sentinel-1 L2 wind converter
///
/// Extracts SAR and ECMWF wind speed/direction from the OWI component of a
/// Sentinel-1 Level-2 OCN product and writes one point per grid cell.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "s1l2-to-shp",
    version,
    about = "Convert Sentinel-1 L2 OWI wind grids from NetCDF to an ESRI Shapefile of points",
    long_about = "Reads the owiLat/owiLon grids and the SAR and ECMWF wind speed/direction grids \
                  of a Sentinel-1 Level-2 OCN NetCDF file and writes one point feature per grid \
                  cell, in row-major order, to <OUTPUT_BASE>.shp (EPSG:4326) with the fields \
                  windspeed, winddir, ewindspeed and ewinddir."
)]
pub struct Args {
    /// Sentinel-1 L2 NetCDF file (OWI component)
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output base name; `.shp` is appended unless it already ends in `.shp`
    #[arg(value_name = "OUTPUT_BASE")]
    pub output_base: PathBuf,

    /// Force overwrite of an existing Shapefile
    #[arg(long = "force", help = "Force overwrite of an existing Shapefile")]
    pub force_overwrite: bool,

    /// Write stored values without CF unpacking
    ///
    /// By default cells flagged by `_FillValue`, `missing_value` or the valid
    /// range are written as null and `scale_factor`/`add_offset` are applied,
    /// as CF-aware readers do.
    #[arg(long = "raw-values", help = "Write stored values without CF unpacking")]
    pub raw_values: bool,

    /// Skip the up-front grid shape check
    ///
    /// Grids are then indexed by their own extent and a cell outside one of
    /// them fails the run when it is reached.
    #[arg(long = "no-shape-check", help = "Skip the up-front grid shape check")]
    pub no_shape_check: bool,

    /// Latitude variable name
    #[arg(long = "lat-var", value_name = "NAME", default_value = VAR_LATITUDE)]
    pub lat_var: String,

    /// Longitude variable name
    #[arg(long = "lon-var", value_name = "NAME", default_value = VAR_LONGITUDE)]
    pub lon_var: String,

    /// SAR wind speed variable name
    #[arg(long = "wind-speed-var", value_name = "NAME", default_value = VAR_WIND_SPEED)]
    pub wind_speed_var: String,

    /// SAR wind direction variable name
    #[arg(long = "wind-dir-var", value_name = "NAME", default_value = VAR_WIND_DIRECTION)]
    pub wind_dir_var: String,

    /// ECMWF wind speed variable name
    #[arg(long = "ecmwf-speed-var", value_name = "NAME", default_value = VAR_ECMWF_WIND_SPEED)]
    pub ecmwf_speed_var: String,

    /// ECMWF wind direction variable name
    #[arg(long = "ecmwf-dir-var", value_name = "NAME", default_value = VAR_ECMWF_WIND_DIRECTION)]
    pub ecmwf_dir_var: String,

    /// Summary report format
    #[arg(
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Human,
        help = "Summary report format"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides the progress bar.
    #[arg(short = 'q', long = "quiet", help = "Only show errors")]
    pub quiet: bool,
}

/// Format of the final summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// JSON for machine consumption
    Json,
}

impl Args {
    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.source.exists() {
            return Err(Error::source_open(&self.source, "file does not exist"));
        }

        if self.source.is_dir() {
            return Err(Error::source_open(&self.source, "path is a directory"));
        }

        if self.output_base.as_os_str().is_empty() {
            return Err(Error::configuration("Output base name must not be empty"));
        }

        if let Some(parent) = self.destination_path().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::configuration(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Destination Shapefile path (`OUTPUT_BASE` + `.shp`)
    pub fn destination_path(&self) -> PathBuf {
        destination_path(&self.output_base)
    }

    /// Source variable names, including any overrides
    pub fn variable_names(&self) -> VariableNames {
        VariableNames {
            latitude: self.lat_var.clone(),
            longitude: self.lon_var.clone(),
            wind_speed: self.wind_speed_var.clone(),
            wind_direction: self.wind_dir_var.clone(),
            ecmwf_wind_speed: self.ecmwf_speed_var.clone(),
            ecmwf_wind_direction: self.ecmwf_dir_var.clone(),
        }
    }

    /// Build the converter configuration
    pub fn to_config(&self) -> ConverterConfig {
        ConverterConfig::new()
            .with_variables(self.variable_names())
            .with_shape_validation(!self.no_shape_check)
            .with_fill_masking(!self.raw_values)
            .with_overwrite(self.force_overwrite)
            .with_progress(self.show_progress())
    }

    /// Get the log level based on verbosity and quiet settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("s1l2-to-shp").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_arguments() {
        let args = parse(&["s1a-owi.nc", "out/wind"]);
        assert_eq!(args.source, PathBuf::from("s1a-owi.nc"));
        assert_eq!(args.destination_path(), PathBuf::from("out/wind.shp"));
        assert_eq!(args.output_format, OutputFormat::Human);
    }

    #[test]
    fn test_output_base_with_shp_extension_kept() {
        let args = parse(&["s1a-owi.nc", "out/wind.shp"]);
        assert_eq!(args.destination_path(), PathBuf::from("out/wind.shp"));

        let help = Args::command().render_long_help().to_string();
        assert!(help.contains("unless it already ends in"));
    }

    #[test]
    fn test_missing_output_is_rejected() {
        assert!(Args::try_parse_from(["s1l2-to-shp", "s1a-owi.nc"]).is_err());
    }

    #[test]
    fn test_default_config_from_args() {
        let config = parse(&["in.nc", "out"]).to_config();
        assert_eq!(config.variables, VariableNames::default());
        assert!(config.validate_shapes);
        assert!(config.mask_fill_values);
        assert!(!config.overwrite);
        assert!(config.show_progress);
    }

    #[test]
    fn test_flags_map_to_config() {
        let args = parse(&[
            "in.nc",
            "out",
            "--force",
            "--raw-values",
            "--no-shape-check",
            "--lat-var",
            "latitude",
            "-q",
        ]);
        let config = args.to_config();
        assert!(config.overwrite);
        assert!(!config.mask_fill_values);
        assert!(!config.validate_shapes);
        assert!(!config.show_progress);
        assert_eq!(config.variables.latitude, "latitude");
        assert_eq!(config.variables.longitude, "owiLon");
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(parse(&["a.nc", "b"]).get_log_level(), "warn");
        assert_eq!(parse(&["a.nc", "b", "-v"]).get_log_level(), "info");
        assert_eq!(parse(&["a.nc", "b", "-vvv"]).get_log_level(), "trace");
        assert_eq!(parse(&["a.nc", "b", "-vv", "-q"]).get_log_level(), "error");
    }

    #[test]
    fn test_json_format() {
        let args = parse(&["a.nc", "b", "--format", "json"]);
        assert_eq!(args.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_validate_checks_source_and_output_dir() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("owi.nc");
        std::fs::write(&source, b"x").unwrap();
        let source_arg = source.to_str().unwrap();

        let missing = dir.path().join("absent.nc");
        let args = parse(&[missing.to_str().unwrap(), "out"]);
        assert!(matches!(args.validate(), Err(Error::SourceOpen { .. })));

        let bad_out = dir.path().join("nope/wind");
        let args = parse(&[source_arg, bad_out.to_str().unwrap()]);
        assert!(matches!(args.validate(), Err(Error::Configuration { .. })));

        let good_out = dir.path().join("wind");
        let args = parse(&[source_arg, good_out.to_str().unwrap()]);
        assert!(args.validate().is_ok());
    }
}
