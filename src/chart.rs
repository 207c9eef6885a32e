//! # Chart Model
//!
//! Types produced by the decoder and consumed by the layout engine.
//!
//! ## Type Hierarchy
//! ```text
//! Chart
//!   ├── name, map_id: String
//!   ├── time: f64 (ceil of the latest note start)
//!   ├── left_slide / right_slide: bool
//!   ├── bar_per_min, time_offset: f64
//!   └── Vec<Note>
//!         ├── position: f64 (lane-local center)
//!         ├── width: f64
//!         ├── side: Side (Left | Front | Right)
//!         ├── kind: NoteKind (Chain | Normal | Hold)
//!         └── start / end: f64
//! ```
//!
//! ## Ordinals
//! `Side` and `NoteKind` keep the numeric codes of the game data
//! (`Left = -1`, `Front = 0`, `Right = 1`; `Chain = 0`, `Normal = 1`, `Hold = 2`).
//! They serialize as those numbers and [`Note::canonical_cmp`] orders by them.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;

/// Lane a note belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    Left = -1,
    #[default]
    Front = 0,
    Right = 1,
}

impl Side {
    pub fn ordinal(self) -> i8 {
        self as i8
    }
}

impl Serialize for Side {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.ordinal())
    }
}

/// Playable note kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum NoteKind {
    Chain = 0,
    #[default]
    Normal = 1,
    Hold = 2,
}

impl NoteKind {
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

impl Serialize for NoteKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.ordinal())
    }
}

/// A single playable note.
///
/// `position` is the note's center in lane-local units: the raw lane offset
/// plus half the width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub position: f64,
    pub width: f64,
    pub side: Side,
    #[serde(rename = "type")]
    pub kind: NoteKind,
    pub start: f64,
    pub end: f64,
}

impl Note {
    /// Build a note from its raw lane offset. `end` starts equal to `start`.
    pub fn new(offset: f64, width: f64, side: Side, kind: NoteKind, start: f64) -> Self {
        Self {
            position: offset + width / 2.0,
            width,
            side,
            kind,
            start,
            end: start,
        }
    }

    /// Set the release time of a hold note. Never moves `end` before `start`.
    pub(crate) fn release_at(&mut self, end: f64) {
        self.end = end.max(self.start);
    }

    pub fn is_hold(&self) -> bool {
        self.kind == NoteKind::Hold
    }

    /// Length of a hold, `None` for every other kind
    pub fn hold_length(&self) -> Option<f64> {
        self.is_hold().then(|| self.end - self.start)
    }

    /// Canonical ordering: higher kind ordinal first, then earlier start.
    ///
    /// Holds sort before normal notes, which sort before chains.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        other
            .kind
            .cmp(&self.kind)
            .then_with(|| self.start.total_cmp(&other.start))
    }
}

/// A decoded chart. Note order carries no meaning.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub name: String,
    pub map_id: String,
    pub notes: Vec<Note>,
    pub time: f64,
    pub left_slide: bool,
    pub right_slide: bool,
    pub bar_per_min: f64,
    pub time_offset: f64,
}

impl Chart {
    /// Notes in canonical order, for consumers that need deterministic output.
    pub fn sorted_notes(&self) -> Vec<Note> {
        let mut notes = self.notes.clone();
        notes.sort_by(Note::canonical_cmp);
        notes
    }

    /// Notes of one lane, in decode order
    pub fn notes_on(&self, side: Side) -> impl Iterator<Item = &Note> + '_ {
        self.notes.iter().filter(move |note| note.side == side)
    }
}
