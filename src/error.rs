//! # Error Types
//!
//! This module defines all error types for the chart decoder and layout engine.
//!
//! Decoding is lenient: malformed or missing fields fall back to defaults and a
//! hold note without a matching terminus degrades to a zero-length hold. Only
//! two situations are errors:
//!
//! ## Error Types
//! - `UnrecognizedFormat` - the payload is neither well-formed JSON nor well-formed XML
//! - `InvalidGeometry` - the border configuration yields a non-positive total width
//! - `InvalidConfig` - a YAML configuration or timeline interval is unusable
//!
//! ## Usage
//! ```rust
//! use dynachart::{parse, ChartError};
//!
//! match parse("not a chart <") {
//!     Ok(chart) => println!("{} notes", chart.notes.len()),
//!     Err(ChartError::UnrecognizedFormat) => eprintln!("chart could not be parsed"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Neither format probe accepted the payload.
    ///
    /// This is terminal: retrying the same payload yields the same result.
    ///
    /// # Example
    /// ```
    /// # use dynachart::ChartError;
    /// let err = ChartError::UnrecognizedFormat;
    /// assert_eq!(err.to_string(), "Unrecognized chart format: payload is neither JSON nor XML");
    /// ```
    #[error("Unrecognized chart format: payload is neither JSON nor XML")]
    UnrecognizedFormat,

    /// The geometry configuration has no usable total width.
    ///
    /// Every border ratio divides by `right_cap_line`, so a zero, negative or
    /// non-finite width is rejected before any ratio is computed.
    ///
    /// # Example
    /// ```
    /// # use dynachart::ChartError;
    /// let err = ChartError::InvalidGeometry { width: 0.0 };
    /// assert_eq!(err.to_string(), "Invalid geometry: total width must be positive, got 0");
    /// ```
    #[error("Invalid geometry: total width must be positive, got {width}")]
    InvalidGeometry { width: f64 },

    /// Invalid configuration value.
    ///
    /// Occurs when a YAML configuration fails to deserialize or a timeline
    /// interval is not a positive number.
    ///
    /// # Example
    /// ```
    /// # use dynachart::ChartError;
    /// let err = ChartError::InvalidConfig("bar interval must be positive".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: bar interval must be positive");
    /// ```
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
