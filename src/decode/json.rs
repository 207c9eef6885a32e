//! JSON chart format.
//!
//! ```text
//! {
//!   "m_Name": "...", "m_mapID": "...",
//!   "m_barPerMin": 1.0, "m_timeOffset": 0.0,
//!   "m_leftRegion": 1, "m_rightRegion": 2,      // 1 = pad
//!   "m_notes":      { "m_notes": [ {note}, ... ] },
//!   "m_notesLeft":  { "m_notes": [ ... ] },
//!   "m_notesRight": { "m_notes": [ ... ] }
//! }
//! note = { "m_id": 1, "m_type": 2, "m_time": 4.0,
//!          "m_position": 1.5, "m_width": 1.0, "m_subId": 3 }
//! ```
//!
//! Type codes: 1 chain, 2 hold, 3 terminus, anything else normal.

use super::coerce::{float_or, int_or, string_or, try_int};
use super::lane::{ChartHeader, Lanes, NoteRecord, RecordKind};
use crate::chart::NoteKind;
use serde_json::Value;

const PAD_REGION: i64 = 1;
const DEFAULT_REGION: i64 = 2;

pub(crate) fn read_header(root: &Value) -> ChartHeader {
    ChartHeader {
        name: string_or(root.get("m_Name"), ""),
        map_id: string_or(root.get("m_mapID"), ""),
        bar_per_min: float_or(root.get("m_barPerMin"), 1.0),
        time_offset: float_or(root.get("m_timeOffset"), 0.0),
        left_slide: int_or(root.get("m_leftRegion"), DEFAULT_REGION) == PAD_REGION,
        right_slide: int_or(root.get("m_rightRegion"), DEFAULT_REGION) == PAD_REGION,
    }
}

pub(crate) fn read_lanes(root: &Value) -> Lanes {
    Lanes {
        front: read_records(root, "m_notes"),
        left: read_records(root, "m_notesLeft"),
        right: read_records(root, "m_notesRight"),
    }
}

fn read_records(root: &Value, tag: &str) -> Vec<NoteRecord> {
    root.get(tag)
        .and_then(|lane| lane.get("m_notes"))
        .and_then(Value::as_array)
        .map(|notes| notes.iter().map(read_record).collect())
        .unwrap_or_default()
}

fn read_record(note: &Value) -> NoteRecord {
    let kind = match int_or(note.get("m_type"), 0) {
        1 => RecordKind::Note(NoteKind::Chain),
        2 => RecordKind::Note(NoteKind::Hold),
        3 => RecordKind::Terminus,
        _ => RecordKind::Note(NoteKind::Normal),
    };

    NoteRecord {
        id: try_int(note.get("m_id")),
        kind,
        time: float_or(note.get("m_time"), 0.0),
        offset: float_or(note.get("m_position"), 2.5),
        width: float_or(note.get("m_width"), 1.0),
        sub_id: int_or(note.get("m_subId"), -1),
    }
}
