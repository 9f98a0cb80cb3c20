// src/plot_functions/plot_force_torque.rs

use plotters::backend::BitMapBackend;
use plotters::drawing::IntoDrawingArea;
use std::error::Error;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::component_names::{component_color, component_name, component_unit, COMPONENT_COUNT};
use crate::constants::{ANIMATION_HEIGHT, ANIMATION_WIDTH, FRAME_DELAY_MS, LINE_WIDTH_PLOT, MARKER_RADIUS_PX};
use crate::plot_framework::{
    column_bounds, draw_stacked_frame, draw_stacked_plot, revealed_points, time_bounds,
    PlotSeries, PANELS_PER_FIGURE,
};
use crate::types::{AxisBounds, PanelPlotData, SeriesTable};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Force/torque plots need {expected} columns, table has {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("Series has no rows to plot")]
    EmptySeries,
}

/// One output figure: three consecutive columns sharing a unit.
#[derive(Debug, Clone, Copy)]
pub struct FigureGroup {
    pub name: &'static str,
    pub title: &'static str,
    pub first_column: usize,
}

pub const FORCE_FIGURE: FigureGroup = FigureGroup {
    name: "Force",
    title: "Force Components Over Time",
    first_column: 0,
};

pub const TORQUE_FIGURE: FigureGroup = FigureGroup {
    name: "Torque",
    title: "Torque Components Over Time",
    first_column: 3,
};

pub const FIGURES: [FigureGroup; 2] = [FORCE_FIGURE, TORQUE_FIGURE];

#[derive(Debug, Clone)]
pub struct AnimationOptions {
    /// Wall-clock delay between frames; both animations share it.
    pub frame_delay_ms: u32,
    /// Subsample to at most this many frames. `None` renders one frame per row.
    pub max_frames: Option<usize>,
    pub output_dir: PathBuf,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            frame_delay_ms: FRAME_DELAY_MS,
            max_frames: None,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Row indices rendered as animation frames.
/// Evenly spread when capped; the final frame always reveals the full series.
pub fn frame_indices(rows: usize, max_frames: Option<usize>) -> Vec<usize> {
    if rows == 0 {
        return Vec::new();
    }
    let cap = match max_frames {
        Some(m) if m > 0 && m < rows => m,
        _ => return (0..rows).collect(),
    };
    if cap == 1 {
        return vec![rows - 1];
    }
    let mut frames: Vec<usize> = (0..cap).map(|i| i * (rows - 1) / (cap - 1)).collect();
    frames.dedup();
    frames
}

fn check_table(table: &SeriesTable) -> Result<(), RenderError> {
    if table.ncols() != COMPONENT_COUNT {
        return Err(RenderError::ColumnCount {
            expected: COMPONENT_COUNT,
            found: table.ncols(),
        });
    }
    if table.nrows() == 0 {
        return Err(RenderError::EmptySeries);
    }
    Ok(())
}

/// x range used for drawing; a single sample still gets a non-empty axis.
fn drawable_time_range(rows: usize) -> Range<f64> {
    let (start, end) = time_bounds(rows);
    if end > start {
        start..end
    } else {
        start..start + 1.0
    }
}

/// Panel data for one column, revealing rows up to `frame` (all rows when `None`).
fn panel_plot_data(
    table: &SeriesTable,
    bounds: &[Option<AxisBounds>],
    column: usize,
    frame: Option<usize>,
) -> Option<PanelPlotData> {
    let (y_min, y_max) = (*bounds.get(column)?)?;
    let last_frame = frame.unwrap_or(table.nrows().saturating_sub(1));
    let data = revealed_points(table, column, last_frame);

    let series = vec![PlotSeries {
        data,
        label: component_name(column).to_string(),
        color: component_color(column),
        stroke_width: LINE_WIDTH_PLOT,
        marker_radius: MARKER_RADIUS_PX,
    }];

    Some((
        component_name(column).to_string(),
        drawable_time_range(table.nrows()),
        y_min..y_max,
        series,
        "Time step".to_string(),
        component_unit(column).to_string(),
    ))
}

fn output_path(options: &AnimationOptions, root_name: &str, figure: &FigureGroup, suffix: &str) -> PathBuf {
    options
        .output_dir
        .join(format!("{}_{}_{}", root_name, figure.name, suffix))
}

/// Renders the force and torque figures as two looping GIF animations.
///
/// Frame `f` of both animations shows every sample with index <= f.
/// Both files are written in lockstep so they hold the same frames at the same delay.
pub fn plot_force_torque_animation(
    table: &SeriesTable,
    root_name: &str,
    options: &AnimationOptions,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    check_table(table)?;
    let bounds = column_bounds(table);
    let frames = frame_indices(table.nrows(), options.max_frames);

    let paths: Vec<PathBuf> = FIGURES
        .iter()
        .map(|figure| output_path(options, root_name, figure, "animated.gif"))
        .collect();

    let mut roots = Vec::with_capacity(FIGURES.len());
    for path in &paths {
        let backend = BitMapBackend::gif(
            path,
            (ANIMATION_WIDTH, ANIMATION_HEIGHT),
            options.frame_delay_ms,
        )?;
        roots.push(backend.into_drawing_area());
    }

    log::info!(
        "Rendering {} frames at {} ms per frame...",
        frames.len(),
        options.frame_delay_ms
    );
    for &frame in &frames {
        for (figure, root_area) in FIGURES.iter().zip(roots.iter()) {
            draw_stacked_frame(root_area, figure.title, figure.name, |panel_index| {
                panel_plot_data(table, &bounds, figure.first_column + panel_index, Some(frame))
            })?;
            root_area.present()?;
        }
    }

    for path in &paths {
        log::info!("  Animation saved as '{}'.", path.display());
    }
    Ok(paths)
}

/// Static stacked PNGs of the full series, one per figure.
pub fn plot_force_torque_stacked(
    table: &SeriesTable,
    root_name: &str,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    check_table(table)?;
    let bounds = column_bounds(table);
    let mut paths = Vec::with_capacity(FIGURES.len());

    for figure in FIGURES.iter() {
        let path = output_dir.join(format!("{}_{}_stacked.png", root_name, figure.name));
        let output_filename = path.to_string_lossy().into_owned();
        draw_stacked_plot(&output_filename, figure.title, figure.name, |panel_index| {
            if panel_index >= PANELS_PER_FIGURE {
                return None;
            }
            panel_plot_data(table, &bounds, figure.first_column + panel_index, None)
        })?;
        paths.push(path);
    }
    Ok(paths)
}


// src/plot_functions/plot_force_torque.rs
