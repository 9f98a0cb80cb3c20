// src/types.rs
// Type aliases shared by the parser, plotting and simulation modules

use crate::component_names::COMPONENT_COUNT;
use ndarray::Array2;
use std::ops::Range;

// Compile-time assertion: the force/torque split into two stacked figures
// assumes three force and three torque columns.
const _: () = assert!(
    COMPONENT_COUNT == 6,
    "COMPONENT_COUNT must be 6 (three forces, three torques)"
);

/// Parsed text series: rows are time steps, columns are components.
pub type SeriesTable = Array2<f64>;

/// Lower and upper y bound of one panel.
pub type AxisBounds = (f64, f64);

/// One stacked panel, as produced by a plot function for `draw_stacked_frame`.
pub type PanelPlotData = (
    String,                                 // title
    Range<f64>,                             // x_range
    Range<f64>,                             // y_range
    Vec<crate::plot_framework::PlotSeries>, // series
    String,                                 // x_label
    String,                                 // y_label
);

// src/types.rs
