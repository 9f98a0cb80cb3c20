// src/constants.rs

use plotters::style::RGBColor;

// Plot dimensions. Animations use a smaller canvas since every frame is encoded.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;
pub const ANIMATION_WIDTH: u32 = 800;
pub const ANIMATION_HEIGHT: u32 = 800;

// Font sizes
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 12;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// Stroke widths and marker size
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const MARKER_RADIUS_PX: u32 = 3;

// Fraction of the data range added above and below each panel.
pub const AXIS_PADDING_FRACTION: f64 = 0.1;
// Range used when a column is constant, so the axis never collapses.
pub const DEGENERATE_RANGE: f64 = 1.0;

// Wall-clock delay between animation frames.
pub const FRAME_DELAY_MS: u32 = 300;

// Text data files carry Fx, Fy, Fz, Tx, Ty, Tz unless told otherwise.
pub const DEFAULT_COLUMN_COUNT: usize = 6;

// --- Component colours, shared per axis (x, y, z) ---
pub const COLOR_AXIS_X: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
pub const COLOR_AXIS_Y: RGBColor = RGBColor(0x27, 0xae, 0x60);
pub const COLOR_AXIS_Z: RGBColor = RGBColor(0x29, 0x80, 0xb9);

// --- Simulation defaults ---
pub const DEFAULT_PHYSICS_DT_S: f64 = 0.01;
pub const DEFAULT_RESET_PERIOD: u64 = 400;
pub const DEFAULT_SAMPLE_PERIOD: u64 = 5;
// Linear (x, y, z) then angular (x, y, z) velocity written on every reset.
pub const DEFAULT_RESET_VELOCITY: [f64; 6] = [0.0, 0.0, 0.0, 1.0, -2.0, 3.0];
pub const DEFAULT_SENSOR_JOINT: &str = "FixedJoint";
pub const DEFAULT_TRACKED_BODY: &str = "sphere";
pub const GRAVITY_M_S2: f64 = 9.81;

// Penalty contact model of the built-in backend.
pub const CONTACT_STIFFNESS_N_M: f64 = 2.0e5;
pub const CONTACT_DAMPING_N_S_M: f64 = 800.0;

// src/constants.rs
