//! Application constants for the Sentinel-1 wind converter
//!
//! This module contains the variable names of the Sentinel-1 Level-2 OWI
//! (Ocean Wind) component, the output schema field names and the fixed
//! settings of the destination Shapefile.

// =============================================================================
// Sentinel-1 L2 OWI Variable Names
// =============================================================================

/// Latitude grid of the OWI component (degrees north)
pub const VAR_LATITUDE: &str = "owiLat";

/// Longitude grid of the OWI component (degrees east)
pub const VAR_LONGITUDE: &str = "owiLon";

/// SAR-derived wind speed at 10m (m/s)
pub const VAR_WIND_SPEED: &str = "owiWindSpeed";

/// SAR-derived wind direction (meteorological convention, degrees)
pub const VAR_WIND_DIRECTION: &str = "owiWindDirection";

/// ECMWF model wind speed co-located with the SAR grid (m/s)
pub const VAR_ECMWF_WIND_SPEED: &str = "owiEcmwfWindSpeed";

/// ECMWF model wind direction co-located with the SAR grid (degrees)
pub const VAR_ECMWF_WIND_DIRECTION: &str = "owiEcmwfWindDirection";

// =============================================================================
// CF Packing Attributes
// =============================================================================

pub const ATTR_FILL_VALUE: &str = "_FillValue";
pub const ATTR_SCALE_FACTOR: &str = "scale_factor";
pub const ATTR_ADD_OFFSET: &str = "add_offset";
pub const ATTR_MISSING_VALUE: &str = "missing_value";
pub const ATTR_VALID_MIN: &str = "valid_min";
pub const ATTR_VALID_MAX: &str = "valid_max";
pub const ATTR_VALID_RANGE: &str = "valid_range";

// =============================================================================
// Output Schema
// =============================================================================

/// Attribute fields written for every point, in schema order
pub mod fields {
    pub const WIND_SPEED: &str = "windspeed";
    pub const WIND_DIRECTION: &str = "winddir";
    pub const ECMWF_WIND_SPEED: &str = "ewindspeed";
    pub const ECMWF_WIND_DIRECTION: &str = "ewinddir";

    /// All attribute field names in declaration order
    pub const ALL: [&str; 4] = [
        WIND_SPEED,
        WIND_DIRECTION,
        ECMWF_WIND_SPEED,
        ECMWF_WIND_DIRECTION,
    ];

    /// DBF width for real-valued fields
    pub const REAL_WIDTH: i32 = 24;

    /// DBF decimal precision for real-valued fields
    pub const REAL_PRECISION: i32 = 15;
}

// =============================================================================
// Destination Format
// =============================================================================

/// OGR driver used for the destination dataset
pub const OGR_DRIVER_NAME: &str = "ESRI Shapefile";

/// Coordinate reference system of the destination (geographic WGS84)
pub const DESTINATION_EPSG: u32 = 4326;

/// File extension appended to the output base name
pub const SHAPEFILE_EXTENSION: &str = "shp";

/// Sidecar files making up a single Shapefile dataset
pub const SHAPEFILE_SIDECAR_EXTENSIONS: &[&str] = &["shp", "shx", "dbf", "prj", "cpg"];

// =============================================================================
// Logging
// =============================================================================

/// Crate target used for the default tracing filter
pub const LOG_TARGET: &str = "s1l2_to_shp";
