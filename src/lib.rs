//! Decoder and layout engine for rhythm-game charts.
//!
//! A chart payload (JSON or XML) is decoded into a [`Chart`], its notes are
//! projected onto a normalized axis by a [`Projector`], and its duration is
//! split into a bar/row ruler by a [`Timeline`]. [`Painter`] runs all three.
//!
//! ```rust
//! use dynachart::{parse, render, Borders};
//!
//! let chart = parse(r#"<MapAsset>
//!   <m_path>demo</m_path>
//!   <m_notes><m_notes>
//!     <CMapNoteAsset><m_id>1</m_id><m_type>NORMAL</m_type><m_time>0.5</m_time></CMapNoteAsset>
//!   </m_notes></m_notes>
//! </MapAsset>"#)?;
//!
//! let descriptors = render(&chart, &Borders::default())?;
//! assert_eq!(chart.time, 1.0);
//! assert_eq!(descriptors.len(), 1);
//! # Ok::<(), dynachart::ChartError>(())
//! ```

pub mod borders;
pub mod chart;
pub mod decode;
pub mod error;
pub mod layout;
pub mod painter;
pub mod timeline;

pub use borders::{BorderRatios, Borders};
pub use chart::*;
pub use decode::{detect_format, parse, parse_json, parse_xml, Format};
pub use error::*;
pub use layout::{Projector, RenderDescriptor};
pub use painter::{Painter, PainterConfig, PlacedNote, Sheet};
pub use timeline::{format_millis, TimeLabel, Timeline, TimelineGrid, MAX_GRID_LINES};

/// Project every note of a chart against a geometry.
pub fn render(chart: &Chart, borders: &Borders) -> Result<Vec<RenderDescriptor>, ChartError> {
    Ok(Projector::new(*borders)?.project_chart(chart))
}

/// Decode a payload and paint it with the default configuration.
pub fn paint(payload: &str) -> Result<Sheet, ChartError> {
    Painter::new(PainterConfig::default())?.paint_payload(payload)
}
