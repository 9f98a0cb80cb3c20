// src/data_input/sample_row.rs

use std::fmt;

use crate::component_names::COMPONENT_COUNT;

/// One force/torque reading: [Fx, Fy, Fz] in N and [Tx, Ty, Tz] in Nm.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SampleRow {
    pub force: [f64; 3],
    pub torque: [f64; 3],
}

impl SampleRow {
    pub fn new(force: [f64; 3], torque: [f64; 3]) -> Self {
        Self { force, torque }
    }

    /// Builds a row from exactly six values in column order.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        if values.len() != COMPONENT_COUNT {
            return None;
        }
        Some(Self {
            force: [values[0], values[1], values[2]],
            torque: [values[3], values[4], values[5]],
        })
    }

    pub fn to_array(&self) -> [f64; COMPONENT_COUNT] {
        [
            self.force[0],
            self.force[1],
            self.force[2],
            self.torque[0],
            self.torque[1],
            self.torque[2],
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

/// Writes the bracketed row format read back by `series_parser`.
impl fmt::Display for SampleRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.to_array();
        write!(f, "[")?;
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_requires_six_values() {
        assert!(SampleRow::from_slice(&[1.0, 2.0, 3.0]).is_none());
        let row = SampleRow::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(row.force, [1.0, 2.0, 3.0]);
        assert_eq!(row.torque, [4.0, 5.0, 6.0]);
    }

    #[test]
    fn display_uses_bracketed_format() {
        let row = SampleRow::new([0.5, -1.0, 98.1], [0.0, 0.25, -3.0]);
        assert_eq!(row.to_string(), "[0.5, -1, 98.1, 0, 0.25, -3]");
    }
}

// src/data_input/sample_row.rs
