/// Centralized force/torque component naming
///
/// Provides consistent component names, units and colours across the parser,
/// the plotting functions and the simulation sinks.
use plotters::style::RGBColor;

use crate::constants::{COLOR_AXIS_X, COLOR_AXIS_Y, COLOR_AXIS_Z};

/// Number of components in one wrench sample.
pub const COMPONENT_COUNT: usize = 6;

/// All component names in column order.
pub const COMPONENT_NAMES: [&str; COMPONENT_COUNT] = ["Fx", "Fy", "Fz", "Tx", "Ty", "Tz"];

/// Get the component name for a given column index
///
/// # Panics
/// Panics if index is greater than 5
pub fn component_name(index: usize) -> &'static str {
    match COMPONENT_NAMES.get(index) {
        Some(name) => name,
        None => panic!(
            "Invalid component index: {}. Expected 0..=5 (Fx, Fy, Fz, Tx, Ty, Tz)",
            index
        ),
    }
}

/// Unit label for a column: forces first, torques second.
pub fn component_unit(index: usize) -> &'static str {
    if index < 3 {
        "N"
    } else {
        "Nm"
    }
}

/// Same colour for the same spatial axis, whether force or torque.
pub fn component_color(index: usize) -> RGBColor {
    match index % 3 {
        0 => COLOR_AXIS_X,
        1 => COLOR_AXIS_Y,
        _ => COLOR_AXIS_Z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name() {
        assert_eq!(component_name(0), "Fx");
        assert_eq!(component_name(2), "Fz");
        assert_eq!(component_name(5), "Tz");
    }

    #[test]
    #[should_panic(expected = "Invalid component index")]
    fn test_component_name_panic() {
        component_name(6);
    }

    #[test]
    fn test_units_and_colors_follow_axis() {
        assert_eq!(component_unit(1), "N");
        assert_eq!(component_unit(4), "Nm");
        assert_eq!(component_color(0), component_color(3));
        assert_eq!(component_color(2), COLOR_AXIS_Z);
    }
}
