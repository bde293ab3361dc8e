//! Test utilities for NetCDF grid reading
//!
//! Builds small Sentinel-1 OWI-like NetCDF files on disk so the reader,
//! converter and writer tests run against the real netcdf library.

use std::path::Path;

use crate::constants::{
    VAR_ECMWF_WIND_DIRECTION, VAR_ECMWF_WIND_SPEED, VAR_LATITUDE, VAR_LONGITUDE,
    VAR_WIND_DIRECTION, VAR_WIND_SPEED,
};


/// Azimuth (row) dimension name used by OWI products
pub const ROW_DIM: &str = "owiAzSize";

/// Range (column) dimension name used by OWI products
pub const COL_DIM: &str = "owiRaSize";

enum FixtureData {
    Float(Vec<f32>),
    Short(Vec<i16>),
    Text,
}

struct FixtureVariable {
    name: String,
    dims: Vec<String>,
    data: FixtureData,
    attributes: Vec<(String, f32)>,
    array_attributes: Vec<(String, Vec<f32>)>,
    short_attributes: Vec<(String, i16)>,
}

/// Declarative description of a NetCDF grid file
pub struct GridFixture {
    dimensions: Vec<(String, usize)>,
    variables: Vec<FixtureVariable>,
}

impl GridFixture {
    /// Empty fixture with the two OWI grid dimensions
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            dimensions: vec![(ROW_DIM.to_string(), rows), (COL_DIM.to_string(), cols)],
            variables: Vec::new(),
        }
    }

    pub fn with_dimension(mut self, name: &str, len: usize) -> Self {
        self.dimensions.push((name.to_string(), len));
        self
    }

    /// Float variable on the default (row, col) dimensions
    pub fn with_variable(self, name: &str, values: Vec<f32>) -> Self {
        self.with_variable_on(name, &[ROW_DIM, COL_DIM], values)
    }

    /// Float variable on explicit dimensions
    pub fn with_variable_on(mut self, name: &str, dims: &[&str], values: Vec<f32>) -> Self {
        self.variables.retain(|var| var.name != name);
        self.variables.push(FixtureVariable {
            name: name.to_string(),
            dims: dims.iter().map(|d| d.to_string()).collect(),
            data: FixtureData::Float(values),
            attributes: Vec::new(),
            array_attributes: Vec::new(),
            short_attributes: Vec::new(),
        });
        self
    }

    /// Packed i16 variable with CF scale/offset and fill value
    pub fn with_packed_variable(
        mut self,
        name: &str,
        values: Vec<i16>,
        scale_factor: f32,
        add_offset: f32,
        fill_value: i16,
    ) -> Self {
        self.variables.retain(|var| var.name != name);
        self.variables.push(FixtureVariable {
            name: name.to_string(),
            dims: vec![ROW_DIM.to_string(), COL_DIM.to_string()],
            data: FixtureData::Short(values),
            attributes: vec![
                ("scale_factor".to_string(), scale_factor),
                ("add_offset".to_string(), add_offset),
            ],
            array_attributes: Vec::new(),
            short_attributes: vec![("_FillValue".to_string(), fill_value)],
        });
        self
    }

    /// String-typed variable that cannot be read as numbers
    pub fn with_text_variable(mut self, name: &str) -> Self {
        self.variables.retain(|var| var.name != name);
        self.variables.push(FixtureVariable {
            name: name.to_string(),
            dims: vec![ROW_DIM.to_string(), COL_DIM.to_string()],
            data: FixtureData::Text,
            attributes: Vec::new(),
            array_attributes: Vec::new(),
            short_attributes: Vec::new(),
        });
        self
    }

    /// Attach a float attribute to an existing variable
    pub fn with_attribute(mut self, variable: &str, name: &str, value: f32) -> Self {
        if let Some(var) = self.variables.iter_mut().find(|var| var.name == variable) {
            var.attributes.push((name.to_string(), value));
        }
        self
    }

    /// Attach a float array attribute (e.g. `valid_range`) to an existing variable
    pub fn with_array_attribute(mut self, variable: &str, name: &str, values: Vec<f32>) -> Self {
        if let Some(var) = self.variables.iter_mut().find(|var| var.name == variable) {
            var.array_attributes.push((name.to_string(), values));
        }
        self
    }

    pub fn without_variable(mut self, name: &str) -> Self {
        self.variables.retain(|var| var.name != name);
        self
    }

    /// Write the fixture as a netCDF-4 file
    pub fn write(&self, path: &Path) {
        let mut file = netcdf::create(path).unwrap();

        for (name, len) in &self.dimensions {
            file.add_dimension(name, *len).unwrap();
        }

        for fixture in &self.variables {
            let dims: Vec<&str> = fixture.dims.iter().map(String::as_str).collect();
            match &fixture.data {
                FixtureData::Float(values) => {
                    let mut var = file.add_variable::<f32>(&fixture.name, &dims).unwrap();
                    for (name, value) in &fixture.attributes {
                        var.put_attribute(name, *value).unwrap();
                    }
                    for (name, values) in &fixture.array_attributes {
                        var.put_attribute(name, values.clone()).unwrap();
                    }
                    var.put_values(values.as_slice(), ..).unwrap();
                }
                FixtureData::Short(values) => {
                    let mut var = file.add_variable::<i16>(&fixture.name, &dims).unwrap();
                    for (name, value) in &fixture.short_attributes {
                        var.put_attribute(name, *value).unwrap();
                    }
                    for (name, value) in &fixture.attributes {
                        var.put_attribute(name, *value).unwrap();
                    }
                    var.put_values(values.as_slice(), ..).unwrap();
                }
                FixtureData::Text => {
                    file.add_string_variable(&fixture.name, &dims).unwrap();
                }
            }
        }
    }
}

/// The 2x2 scenario: ECMWF values are the SAR values scaled by 1.1
pub fn sample_owi_fixture() -> GridFixture {
    let wind_speed = vec![5.0, 6.0, 7.0, 8.0];
    let wind_direction = vec![0.0, 90.0, 180.0, 270.0];
    let ecmwf_speed = wind_speed.iter().map(|v| v * 1.1).collect();
    let ecmwf_direction = wind_direction.iter().map(|v| v * 1.1).collect();

    GridFixture::new(2, 2)
        .with_variable(VAR_LATITUDE, vec![10.0, 10.0, 11.0, 11.0])
        .with_variable(VAR_LONGITUDE, vec![20.0, 21.0, 20.0, 21.0])
        .with_variable(VAR_WIND_SPEED, wind_speed)
        .with_variable(VAR_WIND_DIRECTION, wind_direction)
        .with_variable(VAR_ECMWF_WIND_SPEED, ecmwf_speed)
        .with_variable(VAR_ECMWF_WIND_DIRECTION, ecmwf_direction)
}

/// An OWI fixture of arbitrary size with distinct values per cell
pub fn ramp_owi_fixture(rows: usize, cols: usize) -> GridFixture {
    let cells = rows * cols;
    let ramp = |base: f32, step: f32| -> Vec<f32> {
        (0..cells).map(|i| base + step * i as f32).collect()
    };
    let latitude = (0..cells).map(|i| 40.0 + (i / cols) as f32 * 0.25).collect();
    let longitude = (0..cells).map(|i| -10.0 + (i % cols) as f32 * 0.25).collect();

    GridFixture::new(rows, cols)
        .with_variable(VAR_LATITUDE, latitude)
        .with_variable(VAR_LONGITUDE, longitude)
        .with_variable(VAR_WIND_SPEED, ramp(1.0, 0.5))
        .with_variable(VAR_WIND_DIRECTION, ramp(0.0, 7.5))
        .with_variable(VAR_ECMWF_WIND_SPEED, ramp(1.5, 0.5))
        .with_variable(VAR_ECMWF_WIND_DIRECTION, ramp(5.0, 7.5))
}
