//! XML chart format.
//!
//! ```text
//! <MapAsset>
//!   <m_path>...</m_path> <m_mapID>...</m_mapID>
//!   <m_barPerMin>1.0</m_barPerMin> <m_timeOffset>0.0</m_timeOffset>
//!   <m_leftRegion>PAD</m_leftRegion> <m_rightRegion>MULTI</m_rightRegion>
//!   <m_notes><m_notes><CMapNoteAsset>...</CMapNoteAsset>...</m_notes></m_notes>
//!   <m_notesLeft><m_notes>...</m_notes></m_notesLeft>
//!   <m_notesRight><m_notes>...</m_notes></m_notesRight>
//! </MapAsset>
//! CMapNoteAsset = <m_id/> <m_type/> <m_time/> <m_position/> <m_width/> <m_subId/>
//! ```
//!
//! Type names (case-insensitive): `chain`, `hold`, `sub` (terminus), anything
//! else is a normal note.
//!
//! Lookups behave like DOM `getElementsByTagName`: the first element with the
//! tag anywhere below the search root, in document order. A field's value is
//! the full text content of that element.

use super::coerce::{float_or, int_or, string_or, try_int};
use super::lane::{ChartHeader, Lanes, NoteRecord, RecordKind};
use crate::chart::NoteKind;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::Value;

const NOTE_TAG: &str = "CMapNoteAsset";

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Element(Element),
    Text(String),
}

/// Minimal element tree, enough for tag lookups and text content
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Element {
    name: String,
    children: Vec<Node>,
}

impl Element {
    fn named(start: &BytesStart) -> Self {
        Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            children: Vec::new(),
        }
    }

    fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First descendant named `tag`, depth-first in document order
    pub(crate) fn find(&self, tag: &str) -> Option<&Element> {
        for child in self.elements() {
            if child.name == tag {
                return Some(child);
            }
            if let Some(found) = child.find(tag) {
                return Some(found);
            }
        }
        None
    }

    /// Every descendant named `tag`, in document order
    pub(crate) fn find_all<'a>(&'a self, tag: &str, out: &mut Vec<&'a Element>) {
        for child in self.elements() {
            if child.name == tag {
                out.push(child);
            }
            child.find_all(tag, out);
        }
    }

    /// Concatenated text of all descendants
    pub(crate) fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Text of the first descendant `tag`, as a string value for coercion
    fn field(&self, tag: &str) -> Option<Value> {
        self.find(tag).map(|e| Value::String(e.text()))
    }
}

/// Parse a well-formed document.
///
/// The returned element is an unnamed document node whose only child is the
/// root element, so lookups also match the root itself. Returns `None` for
/// anything a strict XML parser would reject: mismatched or unclosed tags,
/// several roots, bad escapes, or stray text outside the root.
pub(crate) fn parse_document(text: &str) -> Option<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if stack.is_empty() && root.is_some() {
                    return None;
                }
                stack.push(Element::named(&start));
            }
            Ok(Event::Empty(start)) => attach(&mut stack, &mut root, Element::named(&start))?,
            Ok(Event::End(_)) => {
                let element = stack.pop()?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().ok()?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Text(text.into_owned())),
                    None if text.trim().is_empty() => {}
                    None => return None,
                }
            }
            Ok(Event::CData(c)) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                stack.last_mut()?.children.push(Node::Text(text));
            }
            Ok(Event::Eof) => break,
            // declaration, comments, processing instructions, doctype
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    if !stack.is_empty() {
        return None;
    }
    root.map(|root| Element {
        name: String::new(),
        children: vec![Node::Element(root)],
    })
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Option<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return None,
    }
    Some(())
}

pub(crate) fn read_header(doc: &Element) -> ChartHeader {
    let is_pad = |tag: &str| {
        string_or(doc.field(tag).as_ref(), "multi")
            .trim()
            .eq_ignore_ascii_case("pad")
    };

    ChartHeader {
        name: string_or(doc.field("m_path").as_ref(), ""),
        map_id: string_or(doc.field("m_mapID").as_ref(), ""),
        bar_per_min: float_or(doc.field("m_barPerMin").as_ref(), 1.0),
        time_offset: float_or(doc.field("m_timeOffset").as_ref(), 1.0),
        left_slide: is_pad("m_leftRegion"),
        right_slide: is_pad("m_rightRegion"),
    }
}

pub(crate) fn read_lanes(doc: &Element) -> Lanes {
    Lanes {
        front: read_records(doc, "m_notes"),
        left: read_records(doc, "m_notesLeft"),
        right: read_records(doc, "m_notesRight"),
    }
}

fn read_records(doc: &Element, tag: &str) -> Vec<NoteRecord> {
    let Some(list) = doc.find(tag).and_then(|lane| lane.find("m_notes")) else {
        return Vec::new();
    };
    let mut notes = Vec::new();
    list.find_all(NOTE_TAG, &mut notes);
    notes.into_iter().map(read_record).collect()
}

fn read_record(note: &Element) -> NoteRecord {
    let type_name = string_or(note.field("m_type").as_ref(), "normal");
    let kind = match type_name.trim().to_lowercase().as_str() {
        "chain" => RecordKind::Note(NoteKind::Chain),
        "hold" => RecordKind::Note(NoteKind::Hold),
        "sub" => RecordKind::Terminus,
        _ => RecordKind::Note(NoteKind::Normal),
    };

    NoteRecord {
        id: try_int(note.field("m_id").as_ref()),
        kind,
        time: float_or(note.field("m_time").as_ref(), 0.0),
        offset: float_or(note.field("m_position").as_ref(), 2.5),
        width: float_or(note.field("m_width").as_ref(), 1.0),
        sub_id: int_or(note.field("m_subId").as_ref(), -1),
    }
}
