//! Integration tests for the chart pipeline
//!
//! Tests decoding of both formats, hold reconciliation, projection and the timeline.

use dynachart::{
    detect_format, paint, parse, render, Borders, ChartError, Format, NoteKind, Side, Timeline,
};
use pretty_assertions::assert_eq;

const JSON_CHART: &str = r#"{
    "m_Name": "Night Drive",
    "m_mapID": "_map_night_H",
    "m_barPerMin": 48.0,
    "m_timeOffset": "0.5",
    "m_leftRegion": 1,
    "m_rightRegion": 2,
    "m_notes": { "m_notes": [
        { "m_id": 0, "m_type": 0, "m_time": 0.25, "m_position": 1.0, "m_width": 1.5, "m_subId": -1 },
        { "m_id": 1, "m_type": 2, "m_time": 1.0, "m_position": 2.0, "m_width": 1.0, "m_subId": 2 },
        { "m_id": 2, "m_type": 3, "m_time": 2.75, "m_position": 2.0, "m_width": 1.0, "m_subId": -1 },
        { "m_id": 3, "m_type": 1, "m_time": 1.5, "m_position": 3.0, "m_width": 0.5, "m_subId": -1 }
    ] },
    "m_notesLeft": { "m_notes": [
        { "m_id": 10, "m_type": 0, "m_time": 2.0, "m_position": 2.5, "m_width": 1.0, "m_subId": -1 }
    ] },
    "m_notesRight": { "m_notes": [
        { "m_id": 20, "m_type": 0, "m_time": 3.25, "m_position": 2.5, "m_width": 1.0, "m_subId": -1 }
    ] }
}"#;

const XML_CHART: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<MapAsset>
  <m_path>Night Drive</m_path>
  <m_mapID>_map_night_H</m_mapID>
  <m_barPerMin>48.0</m_barPerMin>
  <m_timeOffset>0.5</m_timeOffset>
  <m_leftRegion>PAD</m_leftRegion>
  <m_rightRegion>MULTI</m_rightRegion>
  <m_notes>
    <m_notes>
      <CMapNoteAsset><m_id>0</m_id><m_type>NORMAL</m_type><m_time>0.25</m_time><m_position>1.0</m_position><m_width>1.5</m_width><m_subId>-1</m_subId></CMapNoteAsset>
      <CMapNoteAsset><m_id>1</m_id><m_type>HOLD</m_type><m_time>1.0</m_time><m_position>2.0</m_position><m_width>1.0</m_width><m_subId>2</m_subId></CMapNoteAsset>
      <CMapNoteAsset><m_id>2</m_id><m_type>SUB</m_type><m_time>2.75</m_time><m_position>2.0</m_position><m_width>1.0</m_width><m_subId>-1</m_subId></CMapNoteAsset>
      <CMapNoteAsset><m_id>3</m_id><m_type>CHAIN</m_type><m_time>1.5</m_time><m_position>3.0</m_position><m_width>0.5</m_width><m_subId>-1</m_subId></CMapNoteAsset>
    </m_notes>
  </m_notes>
  <m_notesLeft>
    <m_notes>
      <CMapNoteAsset><m_id>10</m_id><m_type>NORMAL</m_type><m_time>2.0</m_time><m_position>2.5</m_position><m_width>1.0</m_width></CMapNoteAsset>
    </m_notes>
  </m_notesLeft>
  <m_notesRight>
    <m_notes>
      <CMapNoteAsset><m_id>20</m_id><m_type>NORMAL</m_type><m_time>3.25</m_time><m_position>2.5</m_position><m_width>1.0</m_width></CMapNoteAsset>
    </m_notes>
  </m_notesRight>
</MapAsset>
"#;

#[test]
fn test_decode_json_chart() {
    let chart = parse(JSON_CHART).expect("JSON chart should decode");

    assert_eq!(chart.name, "Night Drive");
    assert_eq!(chart.map_id, "_map_night_H");
    assert_eq!(chart.bar_per_min, 48.0);
    assert_eq!(chart.time_offset, 0.5);
    assert!(chart.left_slide);
    assert!(!chart.right_slide);
    // terminus record is not a note
    assert_eq!(chart.notes.len(), 5);
    assert_eq!(chart.time, 4.0);

    let hold = chart
        .notes
        .iter()
        .find(|n| n.kind == NoteKind::Hold)
        .expect("hold note");
    assert_eq!(hold.start, 1.0);
    assert_eq!(hold.end, 2.75);
    assert_eq!(hold.position, 2.5);
}

#[test]
fn test_both_formats_decode_to_the_same_chart() {
    assert_eq!(detect_format(JSON_CHART), Some(Format::Json));
    assert_eq!(detect_format(XML_CHART), Some(Format::Xml));

    let from_json = parse(JSON_CHART).unwrap();
    let from_xml = parse(XML_CHART).unwrap();
    assert_eq!(from_json, from_xml);
}

#[test]
fn test_decoding_is_idempotent() {
    assert_eq!(parse(JSON_CHART).unwrap(), parse(JSON_CHART).unwrap());
    assert_eq!(parse(XML_CHART).unwrap(), parse(XML_CHART).unwrap());
}

#[test]
fn test_unrecognized_payload() {
    assert_eq!(parse("m_notes: []"), Err(ChartError::UnrecognizedFormat));
    assert_eq!(parse("<MapAsset>"), Err(ChartError::UnrecognizedFormat));
}

#[test]
fn test_format_defaults_differ() {
    let json = parse("{}").unwrap();
    let xml = parse("<MapAsset/>").unwrap();

    assert_eq!(json.bar_per_min, 1.0);
    assert_eq!(xml.bar_per_min, 1.0);
    assert_eq!(json.time_offset, 0.0);
    assert_eq!(xml.time_offset, 1.0);
    assert!(!json.left_slide && !xml.left_slide);
}

#[test]
fn test_malformed_fields_do_not_block_notes() {
    let chart = parse(
        r#"{
        "m_barPerMin": "fast",
        "m_timeOffset": [],
        "m_leftRegion": "pad",
        "m_notes": { "m_notes": [
            { "m_id": 1, "m_type": "x", "m_time": "soon", "m_position": null, "m_width": {} }
        ] }
    }"#,
    )
    .unwrap();

    assert_eq!(chart.bar_per_min, 1.0);
    assert_eq!(chart.time_offset, 0.0);
    assert!(!chart.left_slide);
    assert_eq!(chart.notes.len(), 1);
    let note = &chart.notes[0];
    assert_eq!(note.kind, NoteKind::Normal);
    assert_eq!(note.start, 0.0);
    assert_eq!(note.width, 1.0);
    assert_eq!(note.position, 3.0);
}

#[test]
fn test_hold_without_integer_id_keeps_its_end() {
    let json = parse(
        r#"{ "m_notes": { "m_notes": [
        { "m_type": 2, "m_time": 1, "m_subId": 5 },
        { "m_id": 5, "m_type": 3, "m_time": 3 }
    ] } }"#,
    )
    .unwrap();
    assert_eq!(json.notes.len(), 1);
    assert_eq!(json.notes[0].end, 3.0);

    let xml = parse(
        r#"<MapAsset><m_notes><m_notes>
        <CMapNoteAsset><m_id>h1</m_id><m_type>HOLD</m_type><m_time>1</m_time><m_subId>5</m_subId></CMapNoteAsset>
        <CMapNoteAsset><m_id>5</m_id><m_type>SUB</m_type><m_time>3</m_time></CMapNoteAsset>
    </m_notes></m_notes></MapAsset>"#,
    )
    .unwrap();
    assert_eq!(xml.notes.len(), 1);
    assert_eq!(xml.notes[0].end, 3.0);
}

#[test]
fn test_infinite_fields_fall_back_to_defaults() {
    let payload = r#"<MapAsset><m_barPerMin>inf</m_barPerMin><m_notes><m_notes>
        <CMapNoteAsset><m_id>1</m_id><m_type>NORMAL</m_type><m_time>inf</m_time><m_width>-Infinity</m_width></CMapNoteAsset>
    </m_notes></m_notes></MapAsset>"#;
    let chart = parse(payload).unwrap();

    assert_eq!(chart.bar_per_min, 1.0);
    assert_eq!(chart.time, 0.0);
    assert_eq!(chart.notes[0].start, 0.0);
    assert_eq!(chart.notes[0].width, 1.0);

    let sheet = paint(payload).unwrap();
    assert_eq!(sheet.grid.bar_count, 0);
}

#[test]
fn test_huge_chart_is_rejected_by_the_painter() {
    let result = paint(
        r#"{ "m_notes": { "m_notes": [ { "m_id": 1, "m_type": 0, "m_time": 1e18 } ] } }"#,
    );
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
}

#[test]
fn test_hold_without_matching_terminus() {
    let chart = parse(
        r#"<MapAsset><m_notes><m_notes>
        <CMapNoteAsset><m_id>1</m_id><m_type>HOLD</m_type><m_time>2</m_time></CMapNoteAsset>
        <CMapNoteAsset><m_id>5</m_id><m_type>SUB</m_type><m_time>4</m_time></CMapNoteAsset>
    </m_notes></m_notes></MapAsset>"#,
    )
    .unwrap();

    assert_eq!(chart.notes.len(), 1);
    assert_eq!(chart.notes[0].side, Side::Front);
    assert_eq!(chart.notes[0].start, 2.0);
    assert_eq!(chart.notes[0].end, 2.0);
}

#[test]
fn test_hold_tail_not_counted_in_duration() {
    let chart = parse(
        r#"{ "m_notes": { "m_notes": [
        { "m_id": 1, "m_type": 2, "m_time": 1.5, "m_subId": 2 },
        { "m_id": 2, "m_type": 3, "m_time": 7.0 }
    ] } }"#,
    )
    .unwrap();

    assert_eq!(chart.notes[0].end, 7.0);
    assert_eq!(chart.time, 2.0);
}

#[test]
fn test_terminus_does_not_cross_lanes() {
    let chart = parse(
        r#"{
        "m_notes": { "m_notes": [ { "m_id": 9, "m_type": 3, "m_time": 5.0 } ] },
        "m_notesRight": { "m_notes": [ { "m_id": 1, "m_type": 2, "m_time": 1.0, "m_subId": 9 } ] }
    }"#,
    )
    .unwrap();

    assert_eq!(chart.notes.len(), 1);
    assert_eq!(chart.notes_on(Side::Front).count(), 0);
    assert_eq!(chart.notes[0].side, Side::Right);
    assert_eq!(chart.notes[0].end, 1.0);
}

#[test]
fn test_render_side_lanes_mirror() {
    let chart = parse(JSON_CHART).unwrap();
    let borders = Borders::default();
    let descriptors = render(&chart, &borders).unwrap();
    assert_eq!(descriptors.len(), chart.notes.len());

    let find = |side: Side| {
        chart
            .notes
            .iter()
            .zip(&descriptors)
            .find(|(note, _)| note.side == side)
            .map(|(_, d)| *d)
            .unwrap()
    };
    let left = find(Side::Left);
    let right = find(Side::Right);

    let extent = borders.side_width_ratio * 1.0 / borders.width();
    assert!((left.x + right.x + extent - 1.0).abs() < 1e-9);

    for d in &descriptors {
        let floor = borders.note_width_limit * borders.side_width_ratio / borders.width();
        assert!(d.width >= floor - 1e-12);
        assert_eq!(d.height.is_some(), d.kind == NoteKind::Hold);
    }
}

#[test]
fn test_render_rejects_degenerate_geometry() {
    let chart = parse(JSON_CHART).unwrap();
    let borders = Borders {
        side_width_ratio: 0.0,
        front_visible_limit: 0.0,
        ..Borders::default()
    };
    assert_eq!(
        render(&chart, &borders),
        Err(ChartError::InvalidGeometry { width: 0.0 })
    );
}

#[test]
fn test_timeline_for_chart() {
    let chart = parse(JSON_CHART).unwrap();
    let timeline = Timeline::new(1.0, 1.0 / 16.0).unwrap();
    let grid = timeline
        .quantize(chart.time, chart.bar_per_min, chart.time_offset, &Borders::default())
        .unwrap();

    assert_eq!(grid.total_time, 4.0);
    assert_eq!(grid.bar_lines.len(), 4);
    assert_eq!(grid.row_lines.len(), 60);
    let labels: Vec<&str> = grid.labels.iter().map(|l| l.text.as_str()).collect();
    // 60 / 48 = 1.25 s per bar, plus 0.5 s offset
    assert_eq!(labels, vec!["00:00.500", "00:01.750", "00:03.000", "00:04.250"]);
}

#[test]
fn test_paint_payload() {
    let sheet = paint(XML_CHART).unwrap();
    // default bar interval is 2.0
    assert_eq!(sheet.grid.total_time, 4.0);
    assert_eq!(sheet.notes.len(), 5);
    assert_eq!(sheet.height, 4.0 * 480.0);
    assert!(sheet.notes.iter().all(|n| (0.0..=100.0).contains(&n.bottom)));

    let json = serde_json::to_value(&sheet).unwrap();
    assert!(json["grid"]["totalTime"].is_number());
    assert_eq!(json["notes"].as_array().map(Vec::len), Some(5));
}
