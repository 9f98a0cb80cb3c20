// src/plot_framework.rs

use ndarray::ArrayView1;
use ndarray_stats::QuantileExt;
use plotters::backend::BitMapBackend;
use plotters::chart::ChartBuilder;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;

use crate::constants::{
    AXIS_PADDING_FRACTION, DEGENERATE_RANGE, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE,
    FONT_SIZE_MAIN_TITLE, FONT_SIZE_MESSAGE, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::types::{AxisBounds, PanelPlotData, SeriesTable};

/// Number of stacked panels per figure (x, y, z of one quantity).
pub const PANELS_PER_FIGURE: usize = 3;

/// Calculate the y bounds of one column.
/// Pads by 10% of the range on both sides; a constant column uses a range of 1.0.
/// Returns `None` for an empty column or one containing NaN.
pub fn padded_bounds(values: ArrayView1<f64>) -> Option<AxisBounds> {
    let min = *values.min().ok()?;
    let max = *values.max().ok()?;
    let range = if max != min { max - min } else { DEGENERATE_RANGE };
    let pad = AXIS_PADDING_FRACTION * range;
    Some((min - pad, max + pad))
}

/// Per-column y bounds for a whole table.
pub fn column_bounds(table: &SeriesTable) -> Vec<Option<AxisBounds>> {
    table.columns().into_iter().map(padded_bounds).collect()
}

/// Fixed x bounds `[0, T - 1]` for a series of `rows` samples.
pub fn time_bounds(rows: usize) -> (f64, f64) {
    (0.0, rows.saturating_sub(1) as f64)
}

/// Points revealed at animation frame `frame`: every index up to and including it.
pub fn revealed_points(table: &SeriesTable, column: usize, frame: usize) -> Vec<(f64, f64)> {
    if column >= table.ncols() {
        return Vec::new();
    }
    let end = (frame + 1).min(table.nrows());
    table
        .column(column)
        .iter()
        .take(end)
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    panel_name: &str,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{panel_name} {plot_type} Data Unavailable: {reason}");

    let estimated_text_width = (message.len() as f32 * FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let center_x = width / 2 - estimated_text_width / 2;
    let center_y = height / 2 - FONT_SIZE_MESSAGE / 2;

    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(message, (center_x.max(0), center_y.max(0)), text_style))?;
    Ok(())
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    /// Circle marker radius in pixels; 0 draws the line only.
    pub marker_radius: u32,
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
}

/// Draws one panel of a stacked figure.
fn draw_single_panel_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(10)
        .y_labels(5)
        .y_label_formatter(&|y| format!("{y:.2}"))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;
        if s.marker_radius > 0 {
            chart.draw_series(
                s.data
                    .iter()
                    .map(|&point| Circle::new(point, s.marker_radius, s.color.filled())),
            )?;
        }
    }

    Ok(())
}

/// Draws a titled figure of three vertically stacked panels into `root_area`.
///
/// Panels without data or with empty ranges get a placeholder message.
/// Returns whether at least one panel was plotted.
pub fn draw_stacked_frame<F>(
    root_area: &DrawingArea<BitMapBackend, Shift>,
    figure_title: &str,
    plot_type_name: &str,
    mut get_panel_plot_data: F,
) -> Result<bool, Box<dyn Error>>
where
    F: FnMut(usize) -> Option<PanelPlotData>,
{
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        figure_title.to_string(),
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE)
            .into_font()
            .color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((PANELS_PER_FIGURE, 1));
    let mut any_panel_plotted = false;

    for (panel_index, area) in sub_plot_areas.iter().enumerate() {
        match get_panel_plot_data(panel_index) {
            Some((title, x_range, y_range, series, x_label, y_label)) => {
                let has_data = series.iter().any(|s| !s.data.is_empty());
                let valid_ranges = x_range.end > x_range.start && y_range.end > y_range.start;
                if has_data && valid_ranges {
                    let plot_config = PlotConfig {
                        title,
                        x_range,
                        y_range,
                        series,
                        x_label,
                        y_label,
                    };
                    draw_single_panel_chart(area, &plot_config)?;
                    any_panel_plotted = true;
                } else {
                    let reason = if !has_data {
                        "No data points"
                    } else {
                        "Invalid ranges"
                    };
                    draw_unavailable_message(area, &title, plot_type_name, reason)?;
                }
            }
            None => {
                let panel_name = format!("Panel {panel_index}");
                draw_unavailable_message(area, &panel_name, plot_type_name, "Data Not Available")?;
            }
        }
    }

    Ok(any_panel_plotted)
}

/// Creates a stacked PNG with three panels.
pub fn draw_stacked_plot<F>(
    output_filename: &str,
    figure_title: &str,
    plot_type_name: &str,
    get_panel_plot_data: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(usize) -> Option<PanelPlotData>,
{
    let root_area =
        BitMapBackend::new(output_filename, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    let any_panel_plotted =
        draw_stacked_frame(&root_area, figure_title, plot_type_name, get_panel_plot_data)?;
    root_area.present()?;

    if any_panel_plotted {
        log::info!("  Stacked plot saved as '{output_filename}'.");
    } else {
        log::warn!("  '{output_filename}' saved with placeholder messages only: no panel had data.");
    }
    Ok(())
}


// src/plot_framework.rs
