//! Destination schema for wind point Shapefiles
//!
//! Every output layer carries Point geometry in EPSG:4326 and exactly four
//! real-valued attribute fields. The schema is declared before the first
//! feature is written and never changes afterwards.

use crate::constants::{DESTINATION_EPSG, fields};
use crate::{Error, Result};
use gdal::spatial_ref::SpatialRef;
use gdal::vector::{FieldDefn, LayerAccess, OGRFieldType, OGRwkbGeometryType};

/// Geometry type of every output layer
pub const GEOMETRY_TYPE: OGRwkbGeometryType::Type = OGRwkbGeometryType::wkbPoint;

/// Definition of one attribute field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: OGRFieldType::Type,
    pub width: i32,
    pub precision: i32,
}

impl FieldSpec {
    const fn real(name: &'static str) -> Self {
        Self {
            name,
            field_type: OGRFieldType::OFTReal,
            width: fields::REAL_WIDTH,
            precision: fields::REAL_PRECISION,
        }
    }
}

/// The four wind attribute fields in declaration order
pub fn wind_fields() -> [FieldSpec; 4] {
    fields::ALL.map(FieldSpec::real)
}

/// Spatial reference of the destination (geographic WGS84)
pub fn destination_srs() -> Result<SpatialRef> {
    SpatialRef::from_epsg(DESTINATION_EPSG).map_err(|e| {
        Error::destination(
            format!("Cannot build spatial reference EPSG:{}", DESTINATION_EPSG),
            e,
        )
    })
}

/// Declare the wind fields on a freshly created layer
pub fn add_wind_fields<L: LayerAccess>(layer: &L) -> Result<()> {
    for spec in wind_fields() {
        let field = FieldDefn::new(spec.name, spec.field_type)
            .map_err(|e| Error::destination(format!("Cannot define field '{}'", spec.name), e))?;
        field.set_width(spec.width);
        field.set_precision(spec.precision);
        field
            .add_to_layer(layer)
            .map_err(|e| Error::destination(format!("Cannot add field '{}'", spec.name), e))?;
    }
    Ok(())
}
