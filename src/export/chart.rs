//! Chart rendering of the daily ON-hours series.
//!
//! Two PNG charts are produced per run: a bar chart and a line chart with
//! point markers, both titled with the summary headline and labelled with
//! the day each sample covers. The x axis runs on day ordinals; dates
//! appear only as tick labels.

use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::error::{DutylineError, Result};
use crate::model::{DailyRecord, Day};

/// Default raster width, 8in at 300 dpi.
pub const DEFAULT_CHART_WIDTH: u32 = 2400;

/// Default raster height, 6in at 300 dpi.
pub const DEFAULT_CHART_HEIGHT: u32 = 1800;

const BAR_FILL: RGBColor = RGBColor(31, 119, 180);

/// Renders the per-day ON-hours series to PNG files.
#[derive(Debug, Clone, Copy)]
pub struct ChartRenderer {
    width: u32,
    height: u32,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer {
    /// Create a renderer at the default raster size.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }

    /// Set the output raster size in pixels.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Render the daily series as a bar chart.
    pub fn render_bar_chart(
        &self,
        path: &Path,
        records: &[DailyRecord],
        title: &str,
    ) -> Result<()> {
        let series = DaySeries::new(records)?;
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| chart_error("fill background", &e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 48))
            .margin(20)
            .x_label_area_size(80)
            .y_label_area_size(80)
            .build_cartesian_2d(series.x_range(), series.y_range())
            .map_err(|e| chart_error("build axes", &e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(series.label_count())
            .x_label_formatter(&format_day_tick)
            .x_label_style(("sans-serif", 24))
            .y_label_style(("sans-serif", 24))
            .y_desc("Time ON each day (hours)")
            .axis_desc_style(("sans-serif", 28))
            .draw()
            .map_err(|e| chart_error("draw axes", &e))?;

        chart
            .draw_series(records.iter().map(|r| {
                let x = r.day.ordinal() as f64;
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, r.on_hours())], BAR_FILL.filled())
            }))
            .map_err(|e| chart_error("draw bars", &e))?;

        root.present().map_err(|e| chart_error("write image", &e))?;
        Ok(())
    }

    /// Render the daily series as a line chart with point markers.
    pub fn render_line_chart(
        &self,
        path: &Path,
        records: &[DailyRecord],
        title: &str,
    ) -> Result<()> {
        let series = DaySeries::new(records)?;
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| chart_error("fill background", &e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 48))
            .margin(20)
            .x_label_area_size(80)
            .y_label_area_size(80)
            .build_cartesian_2d(series.x_range(), series.y_range())
            .map_err(|e| chart_error("build axes", &e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(series.label_count())
            .x_label_formatter(&format_day_tick)
            .x_label_style(("sans-serif", 24))
            .y_label_style(("sans-serif", 24))
            .y_desc("Time ON each day (hours)")
            .axis_desc_style(("sans-serif", 28))
            .draw()
            .map_err(|e| chart_error("draw axes", &e))?;

        chart
            .draw_series(LineSeries::new(
                records
                    .iter()
                    .map(|r| (r.day.ordinal() as f64, r.on_hours())),
                &RED,
            ))
            .map_err(|e| chart_error("draw line", &e))?;

        chart
            .draw_series(records.iter().map(|r| {
                Circle::new((r.day.ordinal() as f64, r.on_hours()), 6, RED.filled())
            }))
            .map_err(|e| chart_error("draw points", &e))?;

        root.present().map_err(|e| chart_error("write image", &e))?;
        Ok(())
    }
}

/// Axis geometry shared by both chart styles.
#[derive(Debug)]
struct DaySeries {
    first: f64,
    last: f64,
    y_top: f64,
    len: usize,
}

impl DaySeries {
    fn new(records: &[DailyRecord]) -> Result<Self> {
        let first = records
            .first()
            .ok_or_else(|| DutylineError::chart("no daily records to plot"))?;
        let last = records.last().unwrap_or(first);
        let max_hours = records
            .iter()
            .map(DailyRecord::on_hours)
            .fold(0.0, f64::max);
        Ok(Self {
            first: first.day.ordinal() as f64,
            last: last.day.ordinal() as f64,
            y_top: if max_hours > 0.0 { max_hours * 1.1 } else { 1.0 },
            len: records.len(),
        })
    }

    fn x_range(&self) -> Range<f64> {
        (self.first - 0.5)..(self.last + 0.5)
    }

    fn y_range(&self) -> Range<f64> {
        0.0..self.y_top
    }

    fn label_count(&self) -> usize {
        self.len.min(12)
    }
}

/// Tick positions land on fractional ordinals; label the nearest day.
fn format_day_tick(x: &f64) -> String {
    Day::from_ordinal(x.round() as i64).to_string()
}

fn chart_error<E: std::fmt::Display>(context: &str, source: &E) -> DutylineError {
    DutylineError::chart(format!("{context}: {source}"))
}
