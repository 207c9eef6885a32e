//! # Layout Projector
//!
//! Projects notes from lane-local coordinates onto the normalized horizontal
//! axis defined by [`Borders`].
//!
//! ## Placement
//! - **Front**: shifted so the lane center lands in the middle of the axis
//! - **Left**: mirrored and scaled by `side_width_ratio`, measured from the left cap
//! - **Right**: mirrored and scaled by `side_width_ratio`, measured from the right cap
//!
//! `x` and `width` are divided by the total width, so on-grid notes land in
//! `[0, 1]`. Off-grid input is not clamped. `y` stays in chart time units;
//! the timeline's `total_time` normalizes it downstream.
//!
//! ## Example
//! ```rust
//! use dynachart::{Borders, Note, NoteKind, Projector, Side};
//!
//! let projector = Projector::new(Borders::default())?;
//! // raw offset at the lane center puts the note's left edge mid-axis
//! let note = Note::new(2.5, 1.0, Side::Front, NoteKind::Normal, 4.0);
//! let placed = projector.project(&note);
//!
//! assert!((placed.x - 0.5).abs() < 1e-9);
//! assert_eq!(placed.y, 4.0);
//! assert_eq!(placed.height, None);
//! # Ok::<(), dynachart::ChartError>(())
//! ```

use crate::borders::Borders;
use crate::chart::{Chart, Note, NoteKind, Side};
use crate::error::ChartError;
use serde::Serialize;

/// Normalized placement of one note
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderDescriptor {
    #[serde(rename = "type")]
    pub kind: NoteKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Hold length in chart time, `None` for other kinds
    pub height: Option<f64>,
}

/// Projector bound to a validated geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    borders: Borders,
    width: f64,
}

impl Projector {
    /// # Errors
    /// [`ChartError::InvalidGeometry`] when the borders have no usable width.
    pub fn new(borders: Borders) -> Result<Self, ChartError> {
        let width = borders.checked_width()?;
        Ok(Self { borders, width })
    }

    pub fn borders(&self) -> &Borders {
        &self.borders
    }

    pub fn project(&self, note: &Note) -> RenderDescriptor {
        let b = &self.borders;
        let clamped = b.effective_width(note.width);
        let half = note.width / 2.0;

        let (x, width) = match note.side {
            Side::Left => (
                b.side_width_ratio * (b.side_visible_cap - (note.position + half)),
                clamped * b.side_width_ratio,
            ),
            Side::Right => (
                self.width - b.side_width_ratio * (b.side_visible_cap - (note.position - half)),
                clamped * b.side_width_ratio,
            ),
            Side::Front => (self.width / 2.0 + (note.position - half) - b.center, clamped),
        };

        RenderDescriptor {
            kind: note.kind,
            x: x / self.width,
            y: note.start,
            width: width / self.width,
            height: note.hold_length(),
        }
    }

    /// Project every note of a chart, in chart order
    pub fn project_chart(&self, chart: &Chart) -> Vec<RenderDescriptor> {
        chart.notes.iter().map(|note| self.project(note)).collect()
    }
}

/// Project a single note against a geometry that is validated on the spot.
pub fn project(note: &Note, borders: &Borders) -> Result<RenderDescriptor, ChartError> {
    Ok(Projector::new(*borders)?.project(note))
}
