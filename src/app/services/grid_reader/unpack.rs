//! CF packing attributes and value unpacking
//!
//! Sentinel-1 OWI variables may be stored packed (`scale_factor`,
//! `add_offset`) and flag cells without a retrieval (land, ice, outside the
//! swath) through `_FillValue`, `missing_value` or a valid range.
//!
//! Masking is decided on the stored value: a cell equal to `_FillValue` or
//! any `missing_value`, below `valid_min` or above `valid_max` becomes NaN.
//! `valid_range` supplies both bounds; explicit `valid_min`/`valid_max`
//! take precedence over it. Every other cell is unpacked as
//! `stored * scale_factor + add_offset`.

use crate::constants::{
    ATTR_ADD_OFFSET, ATTR_FILL_VALUE, ATTR_MISSING_VALUE, ATTR_SCALE_FACTOR, ATTR_VALID_MAX,
    ATTR_VALID_MIN, ATTR_VALID_RANGE,
};
use netcdf::AttributeValue;

/// Packing and masking attributes read from a single variable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackingInfo {
    pub fill_value: Option<f64>,
    pub missing_values: Vec<f64>,
    pub valid_min: Option<f64>,
    pub valid_max: Option<f64>,
    pub scale_factor: Option<f64>,
    pub add_offset: Option<f64>,
}

impl PackingInfo {
    /// Read packing attributes from a NetCDF variable
    pub fn from_variable(var: &netcdf::Variable) -> Self {
        let range = get_f64_values(var, ATTR_VALID_RANGE).filter(|range| range.len() == 2);

        Self {
            fill_value: get_f64_attr(var, ATTR_FILL_VALUE),
            missing_values: get_f64_values(var, ATTR_MISSING_VALUE).unwrap_or_default(),
            valid_min: get_f64_attr(var, ATTR_VALID_MIN)
                .or_else(|| range.as_ref().map(|r| r[0])),
            valid_max: get_f64_attr(var, ATTR_VALID_MAX)
                .or_else(|| range.as_ref().map(|r| r[1])),
            scale_factor: get_f64_attr(var, ATTR_SCALE_FACTOR),
            add_offset: get_f64_attr(var, ATTR_ADD_OFFSET),
        }
    }

    /// True when unpacking would change no value
    pub fn is_identity(&self) -> bool {
        self.fill_value.is_none()
            && self.missing_values.is_empty()
            && self.valid_min.is_none()
            && self.valid_max.is_none()
            && self.scale_factor.is_none()
            && self.add_offset.is_none()
    }

    /// Whether a stored value is flagged as missing
    pub fn is_masked(&self, stored: f64) -> bool {
        let matches = |flag: f64| {
            if flag.is_nan() {
                stored.is_nan()
            } else {
                stored == flag
            }
        };

        self.fill_value.is_some_and(matches)
            || self.missing_values.iter().copied().any(matches)
            || self.valid_min.is_some_and(|min| stored < min)
            || self.valid_max.is_some_and(|max| stored > max)
    }

    /// Unpack one stored value
    pub fn unpack_value(&self, stored: f64) -> f64 {
        if self.is_masked(stored) {
            return f64::NAN;
        }
        stored * self.scale_factor.unwrap_or(1.0) + self.add_offset.unwrap_or(0.0)
    }

    /// Unpack a whole buffer in place
    pub fn unpack(&self, values: &mut [f64]) {
        if self.is_identity() {
            return;
        }
        for value in values.iter_mut() {
            *value = self.unpack_value(*value);
        }
    }
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get a scalar attribute as f64, whatever its stored numeric type.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    get_f64_values(var, name).and_then(|values| values.first().copied())
}

/// Numeric attribute values (scalar or array) widened to f64
fn get_f64_values(var: &netcdf::Variable, name: &str) -> Option<Vec<f64>> {
    if !has_attr(var, name) {
        return None;
    }
    let values = match var.attribute_value(name)?.ok()? {
        AttributeValue::Schar(v) => vec![f64::from(v)],
        AttributeValue::Schars(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Uchar(v) => vec![f64::from(v)],
        AttributeValue::Uchars(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Short(v) => vec![f64::from(v)],
        AttributeValue::Shorts(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Ushort(v) => vec![f64::from(v)],
        AttributeValue::Ushorts(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Int(v) => vec![f64::from(v)],
        AttributeValue::Ints(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Uint(v) => vec![f64::from(v)],
        AttributeValue::Uints(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Float(v) => vec![f64::from(v)],
        AttributeValue::Floats(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Double(v) => vec![v],
        AttributeValue::Doubles(v) => v,
        _ => return None,
    };
    (!values.is_empty()).then_some(values)
}
