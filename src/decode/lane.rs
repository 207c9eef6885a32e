//! # Lane Reconciliation
//!
//! Both chart formats describe a lane as a flat list of records. A hold note is
//! split in two: the hold record carries a secondary id pointing at a separate
//! terminus record that only holds the release time. This module turns the
//! format-neutral [`NoteRecord`]s into [`Note`]s and joins each hold with its
//! terminus.
//!
//! Only a terminus needs an integer id. A hold is linked through its
//! secondary id alone, so a hold whose own id is missing or malformed still
//! gets its release time.
//!
//! ## Scoping
//! Terminus and hold tables live inside one [`read_lane`] call. A terminus in
//! the front lane can never close a hold in the left or right lane.
//!
//! ## Duration
//! [`assemble`] sets `Chart::time` to the ceiling of the latest note *start*.
//! Hold tails past that point are not counted.

use crate::chart::{Chart, Note, NoteKind, Side};
use std::collections::HashMap;
use tracing::{debug, trace};

/// What a raw record turns into
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum RecordKind {
    Note(NoteKind),
    /// Release time for a hold elsewhere in the lane
    Terminus,
}

/// One raw note entry, after field coercion
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NoteRecord {
    pub id: Option<i64>,
    pub kind: RecordKind,
    pub time: f64,
    pub offset: f64,
    pub width: f64,
    pub sub_id: i64,
}

/// Chart-level fields shared by both formats
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ChartHeader {
    pub name: String,
    pub map_id: String,
    pub bar_per_min: f64,
    pub time_offset: f64,
    pub left_slide: bool,
    pub right_slide: bool,
}

/// Raw records of the three lanes
#[derive(Debug, Clone, Default)]
pub(crate) struct Lanes {
    pub front: Vec<NoteRecord>,
    pub left: Vec<NoteRecord>,
    pub right: Vec<NoteRecord>,
}

/// Convert one lane's records into notes appended to `dest`.
///
/// Returns the latest start among the emitted notes (0.0 for an empty lane).
pub(crate) fn read_lane(records: &[NoteRecord], side: Side, dest: &mut Vec<Note>) -> f64 {
    let mut termini: HashMap<i64, f64> = HashMap::new();
    // (index in dest, secondary id) for every hold, whatever its own id
    let mut holds: Vec<(usize, i64)> = Vec::new();
    let mut max_start: f64 = 0.0;
    let mut emitted = 0usize;

    for record in records {
        let kind = match record.kind {
            RecordKind::Terminus => {
                if let Some(id) = record.id {
                    termini.insert(id, record.time);
                }
                continue;
            }
            RecordKind::Note(kind) => kind,
        };

        let note = Note::new(record.offset, record.width, side, kind, record.time);
        if kind == NoteKind::Hold {
            holds.push((dest.len(), record.sub_id));
        }
        dest.push(note);
        emitted += 1;
        max_start = max_start.max(record.time);
    }

    for (index, sub_id) in holds {
        match termini.get(&sub_id) {
            Some(&end) => dest[index].release_at(end),
            None => trace!(index, sub_id, ?side, "hold has no terminus, keeping zero length"),
        }
    }

    debug!(?side, notes = emitted, termini = termini.len(), "read lane");
    max_start
}

/// Reconcile all three lanes and build the chart.
pub(crate) fn assemble(header: ChartHeader, lanes: &Lanes) -> Chart {
    let mut notes = Vec::with_capacity(lanes.front.len() + lanes.left.len() + lanes.right.len());

    let front = read_lane(&lanes.front, Side::Front, &mut notes);
    let left = read_lane(&lanes.left, Side::Left, &mut notes);
    let right = read_lane(&lanes.right, Side::Right, &mut notes);

    Chart {
        name: header.name,
        map_id: header.map_id,
        notes,
        time: front.max(left).max(right).ceil(),
        left_slide: header.left_slide,
        right_slide: header.right_slide,
        bar_per_min: header.bar_per_min,
        time_offset: header.time_offset,
    }
}
