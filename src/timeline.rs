//! # Timeline Quantizer
//!
//! Splits a chart's duration into a ruler of bars (coarse) and rows (fine),
//! and labels every bar with its real time.
//!
//! ## Units
//! Line positions are percentages of the full timeline height, measured from
//! the bottom. Column lines are percentages of the full width. `total_time`
//! is the duration rounded up to whole bars, in chart time units. It is the
//! denominator for every render descriptor's `y`.
//!
//! ## Example
//! ```rust
//! use dynachart::{Borders, Timeline};
//!
//! let timeline = Timeline::new(1.0, 1.0 / 16.0)?;
//! let grid = timeline.quantize(3.0, 60.0, 0.0, &Borders::default())?;
//!
//! assert_eq!(grid.total_time, 3.0);
//! assert_eq!(grid.bar_lines.len(), 3);
//! assert_eq!(grid.row_lines.len(), 48 - 3);
//! assert_eq!(grid.labels[1].text, "00:01.000");
//! # Ok::<(), dynachart::ChartError>(())
//! ```

use crate::borders::Borders;
use crate::error::ChartError;
use serde::Serialize;

/// Rows closer than this to a bar boundary are not drawn.
const ROW_EPSILON: f64 = 1e-4;

/// Lower bound applied to the tempo before dividing by it.
const MIN_BAR_PER_MIN: f64 = 1e-4;

/// Upper bound on bars and on rows in one grid.
pub const MAX_GRID_LINES: usize = 1 << 20;

/// Bar timestamp and its vertical position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLabel {
    pub bar_index: usize,
    pub text: String,
    /// Percent from the bottom
    pub position: f64,
}

/// Everything a renderer needs to draw the ruler
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineGrid {
    pub total_time: f64,
    pub bar_count: usize,
    pub bar_size: f64,
    pub row_size: f64,
    pub row_lines: Vec<f64>,
    pub bar_lines: Vec<f64>,
    /// Left border, front left, front right, right border
    pub column_lines: [f64; 4],
    pub labels: Vec<TimeLabel>,
}

/// Bar and row intervals, in chart time units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    bar_interval: f64,
    row_interval: f64,
}

impl Timeline {
    /// # Errors
    /// [`ChartError::InvalidConfig`] unless both intervals are finite and positive.
    pub fn new(bar_interval: f64, row_interval: f64) -> Result<Self, ChartError> {
        for (name, value) in [("bar interval", bar_interval), ("row interval", row_interval)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ChartError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(Self {
            bar_interval,
            row_interval,
        })
    }

    pub fn bar_interval(&self) -> f64 {
        self.bar_interval
    }

    pub fn row_interval(&self) -> f64 {
        self.row_interval
    }

    pub fn bar_count(&self, duration: f64) -> usize {
        (duration / self.bar_interval).ceil().max(0.0) as usize
    }

    /// Duration rounded up to whole bars
    pub fn total_time(&self, duration: f64) -> f64 {
        self.bar_interval * self.bar_count(duration) as f64
    }

    /// Build the grid for a chart lasting `duration`.
    ///
    /// # Errors
    /// [`ChartError::InvalidGeometry`] when `borders` has no usable width,
    /// [`ChartError::InvalidConfig`] when the grid would need more than
    /// [`MAX_GRID_LINES`] bars or rows.
    pub fn quantize(
        &self,
        duration: f64,
        bar_per_min: f64,
        time_offset: f64,
        borders: &Borders,
    ) -> Result<TimelineGrid, ChartError> {
        let ratios = borders.ratios()?;

        // counted in f64 so oversized grids are caught before the cast
        let bars = (duration / self.bar_interval).ceil().max(0.0);
        let rows = (bars * self.bar_interval / self.row_interval).floor();
        if !(bars <= MAX_GRID_LINES as f64 && rows <= MAX_GRID_LINES as f64) {
            return Err(ChartError::InvalidConfig(format!(
                "grid for duration {} needs {} bars and {} rows, limit is {}",
                duration, bars, rows, MAX_GRID_LINES
            )));
        }
        let bar_count = bars as usize;
        let row_count = rows as usize;
        let total_time = self.bar_interval * bar_count as f64;
        let bar_size = if bar_count == 0 {
            0.0
        } else {
            100.0 / bar_count as f64
        };
        let bar_row_ratio = self.bar_interval / self.row_interval;
        let row_size = bar_size / bar_row_ratio;

        let row_lines = (0..row_count)
            .filter(|&i| {
                let i = i as f64;
                (i - (i / bar_row_ratio).round() * bar_row_ratio).abs() >= ROW_EPSILON
            })
            .map(|i| i as f64 * row_size)
            .collect();

        let bar_lines: Vec<f64> = (0..bar_count).map(|i| i as f64 * bar_size).collect();

        let labels = bar_lines
            .iter()
            .enumerate()
            .map(|(bar_index, &position)| TimeLabel {
                bar_index,
                text: self.bar_timestamp(bar_index, bar_per_min, time_offset),
                position,
            })
            .collect();

        Ok(TimelineGrid {
            total_time,
            bar_count,
            bar_size,
            row_size,
            row_lines,
            bar_lines,
            column_lines: ratios.columns().map(|r| r * 100.0),
            labels,
        })
    }

    /// Formatted real time at the start of a bar
    pub fn bar_timestamp(&self, bar_index: usize, bar_per_min: f64, time_offset: f64) -> String {
        let seconds =
            bar_index as f64 * self.bar_interval * 60.0 / bar_per_min.max(MIN_BAR_PER_MIN) + time_offset;
        format_millis(round_half_up(seconds * 1000.0))
    }
}

// Halves round towards positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Format milliseconds as `[HH:]MM:SS.mmm`. Hours appear only when nonzero.
///
/// Negative values are printed as `-` followed by the formatted magnitude,
/// so `-1500` becomes `-00:01.500`.
pub fn format_millis(millis: i64) -> String {
    let sign = if millis < 0 { "-" } else { "" };
    let millis = millis.unsigned_abs();

    let hours = millis / 3_600_000;
    let minutes = millis % 3_600_000 / 60_000;
    let seconds = millis % 60_000 / 1000;
    let ms = millis % 1000;

    if hours > 0 {
        format!("{}{:02}:{:02}:{:02}.{:03}", sign, hours, minutes, seconds, ms)
    } else {
        format!("{}{:02}:{:02}.{:03}", sign, minutes, seconds, ms)
    }
}
