//! # Painter
//!
//! Combines the projector and the timeline into one renderer-ready [`Sheet`].
//! Everything on a sheet is in percent of the sheet, except the sheet's own
//! pixel size. A renderer only has to position boxes and lines.
//!
//! ## Sheet Layout
//! - Sheet: `container_width` pixels wide, `total_time * container_bar_height` pixels tall
//! - Notes: `left`/`width` in percent of the width, `bottom`/`height` in percent of the height
//! - Holds are drawn at least a quarter row tall
//! - Time labels are right-anchored at the left border line
//!
//! ## Configuration
//! ```rust
//! use dynachart::PainterConfig;
//!
//! let config = PainterConfig::from_yaml(r#"
//! bar-interval: 1.0
//! container-width: 640
//! borders:
//!   side-width-ratio: 0.4
//! "#)?;
//! assert_eq!(config.bar_interval, 1.0);
//! assert_eq!(config.row_interval, 1.0 / 16.0);
//! assert_eq!(config.borders.side_width_ratio, 0.4);
//! # Ok::<(), dynachart::ChartError>(())
//! ```

use crate::borders::Borders;
use crate::chart::{Chart, NoteKind};
use crate::decode::parse;
use crate::error::ChartError;
use crate::layout::{Projector, RenderDescriptor};
use crate::timeline::{Timeline, TimelineGrid};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PainterConfig {
    pub borders: Borders,
    pub bar_interval: f64,
    pub row_interval: f64,
    /// Sheet width in pixels
    pub container_width: f64,
    /// Pixels per chart time unit
    pub container_bar_height: f64,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            borders: Borders::default(),
            bar_interval: 2.0,
            row_interval: 1.0 / 16.0,
            container_width: 864.0,
            container_bar_height: 480.0,
        }
    }
}

impl PainterConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ChartError> {
        serde_yaml::from_str(content).map_err(|e| ChartError::InvalidConfig(e.to_string()))
    }
}

/// A note positioned on the sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedNote {
    #[serde(rename = "type")]
    pub kind: NoteKind,
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: Option<f64>,
}

/// Everything needed to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub width: f64,
    pub height: f64,
    /// Right anchor of the time labels, percent of the width
    pub label_right: f64,
    pub grid: TimelineGrid,
    pub notes: Vec<PlacedNote>,
}

#[derive(Debug, Clone, Copy)]
pub struct Painter {
    projector: Projector,
    timeline: Timeline,
    config: PainterConfig,
}

impl Painter {
    /// # Errors
    /// [`ChartError::InvalidGeometry`] for unusable borders,
    /// [`ChartError::InvalidConfig`] for non-positive intervals.
    pub fn new(config: PainterConfig) -> Result<Self, ChartError> {
        Ok(Self {
            projector: Projector::new(config.borders)?,
            timeline: Timeline::new(config.bar_interval, config.row_interval)?,
            config,
        })
    }

    pub fn config(&self) -> &PainterConfig {
        &self.config
    }

    pub fn paint(&self, chart: &Chart) -> Result<Sheet, ChartError> {
        let borders = &self.config.borders;
        let grid = self
            .timeline
            .quantize(chart.time, chart.bar_per_min, chart.time_offset, borders)?;
        let total_time = grid.total_time;
        let min_hold = self.config.row_interval / 4.0;

        let notes = self
            .projector
            .project_chart(chart)
            .iter()
            .map(|d| place(d, total_time, min_hold))
            .collect();

        let label_right = (1.0 - borders.ratios()?.left_border) * 100.0;
        debug!(
            notes = chart.notes.len(),
            bars = grid.bar_count,
            total_time,
            "painted chart"
        );

        Ok(Sheet {
            width: self.config.container_width,
            height: total_time * self.config.container_bar_height,
            label_right,
            grid,
            notes,
        })
    }

    /// Decode a raw payload and paint it.
    pub fn paint_payload(&self, payload: &str) -> Result<Sheet, ChartError> {
        self.paint(&parse(payload)?)
    }
}

fn place(d: &RenderDescriptor, total_time: f64, min_hold: f64) -> PlacedNote {
    PlacedNote {
        kind: d.kind,
        left: 100.0 * d.x,
        bottom: percent_of(d.y, total_time),
        width: 100.0 * d.width,
        height: d.height.map(|h| percent_of(h.max(min_hold), total_time)),
    }
}

fn percent_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        100.0 * value / total
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Note, Side};

    fn painter() -> Painter {
        Painter::new(PainterConfig::default()).unwrap()
    }

    #[test]
    fn test_sheet_dimensions() {
        let chart = Chart {
            time: 3.0,
            bar_per_min: 60.0,
            notes: vec![Note::new(2.0, 1.0, Side::Front, NoteKind::Normal, 1.0)],
            ..Chart::default()
        };
        let sheet = painter().paint(&chart).unwrap();
        // two bars of 2.0
        assert_eq!(sheet.grid.total_time, 4.0);
        assert_eq!(sheet.height, 4.0 * 480.0);
        assert_eq!(sheet.width, 864.0);
        assert_eq!(sheet.notes[0].bottom, 25.0);
        assert_eq!(sheet.notes[0].height, None);
    }

    #[test]
    fn test_short_holds_get_minimum_height() {
        let chart = Chart {
            time: 2.0,
            notes: vec![Note::new(2.0, 1.0, Side::Left, NoteKind::Hold, 0.0)],
            ..Chart::default()
        };
        let sheet = painter().paint(&chart).unwrap();
        let expected = 100.0 * (1.0 / 64.0) / 2.0;
        assert_eq!(sheet.notes[0].height, Some(expected));
    }

    #[test]
    fn test_empty_chart() {
        let sheet = painter().paint(&Chart::default()).unwrap();
        assert_eq!(sheet.height, 0.0);
        assert!(sheet.notes.is_empty());
        assert!(sheet.grid.labels.is_empty());
    }

    #[test]
    fn test_label_anchor() {
        let sheet = painter().paint(&Chart::default()).unwrap();
        let left_border = Borders::default().ratios().unwrap().left_border;
        assert_eq!(sheet.label_right, (1.0 - left_border) * 100.0);
    }

    #[test]
    fn test_invalid_config() {
        let config = PainterConfig {
            row_interval: 0.0,
            ..PainterConfig::default()
        };
        assert!(matches!(
            Painter::new(config),
            Err(ChartError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_is_kept() {
        let config = PainterConfig {
            bar_interval: 1.0,
            container_width: 640.0,
            ..PainterConfig::default()
        };
        let custom = Painter::new(config).unwrap();
        assert_eq!(custom.config(), &config);
        assert_eq!(painter().config().bar_interval, 2.0);
    }

    #[test]
    fn test_oversized_chart_is_rejected() {
        let chart = Chart {
            time: 1e18,
            ..Chart::default()
        };
        assert!(matches!(
            painter().paint(&chart),
            Err(ChartError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unrecognized_payload() {
        assert_eq!(
            painter().paint_payload("<<<").unwrap_err(),
            ChartError::UnrecognizedFormat
        );
    }
}
