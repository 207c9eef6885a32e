//! # Chart Decoder
//!
//! Turns a raw chart payload into a [`Chart`].
//!
//! ## Formats
//! Charts come in two interchangeable encodings:
//! - **JSON** - integer type codes, integer region codes (`1` = pad)
//! - **XML** - textual type names, textual region names (`pad`)
//!
//! The payload is probed rather than labelled: it is JSON if it parses as
//! JSON, otherwise XML if it is a well-formed XML document, otherwise
//! [`ChartError::UnrecognizedFormat`].
//!
//! ## Leniency
//! Field extraction never fails. A missing, wrong-typed or unparseable field
//! takes a fixed default (see [`coerce`]). Defaults differ between formats:
//!
//! | Field | JSON | XML |
//! |---|---|---|
//! | tempo (`bar_per_min`) | 1.0 | 1.0 |
//! | `time_offset` | 0.0 | 1.0 |
//! | region | `2` (multi) | `"multi"` |
//!
//! ## Pipeline
//! 1. Probe the format ([`Format`])
//! 2. Read chart-level fields and the three raw lanes
//! 3. Reconcile each lane, joining holds with their terminus records
//! 4. Assemble the chart and its duration
//!
//! ## Example
//! ```rust
//! use dynachart::{parse, Side};
//!
//! let chart = parse(r#"{
//!     "m_Name": "demo",
//!     "m_notes": { "m_notes": [
//!         { "m_id": 1, "m_type": 2, "m_time": 1.0, "m_subId": 2 },
//!         { "m_id": 2, "m_type": 3, "m_time": 1.5 }
//!     ] }
//! }"#)?;
//!
//! assert_eq!(chart.name, "demo");
//! assert_eq!(chart.notes.len(), 1);
//! assert_eq!(chart.notes[0].side, Side::Front);
//! assert_eq!(chart.notes[0].end, 1.5);
//! # Ok::<(), dynachart::ChartError>(())
//! ```

pub mod coerce;
mod json;
mod lane;
mod xml;

use crate::chart::Chart;
use crate::error::ChartError;
use serde_json::Value;
use tracing::debug;

/// Serialized chart encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

/// A payload that passed one of the format probes
enum Document {
    Json(Value),
    Xml(xml::Element),
}

impl Document {
    fn probe(payload: &str) -> Option<Self> {
        if let Ok(value) = serde_json::from_str::<Value>(payload) {
            return Some(Document::Json(value));
        }
        xml::parse_document(payload).map(Document::Xml)
    }

    fn format(&self) -> Format {
        match self {
            Document::Json(_) => Format::Json,
            Document::Xml(_) => Format::Xml,
        }
    }

    fn into_chart(self) -> Chart {
        match self {
            Document::Json(root) => lane::assemble(json::read_header(&root), &json::read_lanes(&root)),
            Document::Xml(doc) => lane::assemble(xml::read_header(&doc), &xml::read_lanes(&doc)),
        }
    }
}

/// Detect which encoding a payload uses, without decoding it.
pub fn detect_format(payload: &str) -> Option<Format> {
    Document::probe(payload).map(|doc| doc.format())
}

/// Decode a chart in either format.
///
/// # Errors
/// Returns [`ChartError::UnrecognizedFormat`] when the payload is neither
/// well-formed JSON nor well-formed XML. Malformed fields inside a recognized
/// payload are never errors.
pub fn parse(payload: &str) -> Result<Chart, ChartError> {
    let doc = Document::probe(payload).ok_or(ChartError::UnrecognizedFormat)?;
    debug!(format = ?doc.format(), "detected chart format");
    Ok(doc.into_chart())
}

/// Decode a chart that must be JSON.
pub fn parse_json(payload: &str) -> Result<Chart, ChartError> {
    let root: Value = serde_json::from_str(payload).map_err(|_| ChartError::UnrecognizedFormat)?;
    Ok(Document::Json(root).into_chart())
}

/// Decode a chart that must be XML.
pub fn parse_xml(payload: &str) -> Result<Chart, ChartError> {
    let doc = xml::parse_document(payload).ok_or(ChartError::UnrecognizedFormat)?;
    Ok(Document::Xml(doc).into_chart())
}
