//! # Geometry Model
//!
//! `Borders` maps lane-local note coordinates onto one shared horizontal axis.
//! The axis runs from the left cap line (0) to the right cap line (the total
//! width). Side lanes are scaled by `side_width_ratio` and mirrored around the
//! front lane in the middle.
//!
//! ```text
//! 0         left_border  front_left            front_right  right_border    width
//! |  left lane   |    :      |     front lane      |     :      | right lane |
//! ```
//!
//! Derived lines are recomputed on every call. Ratios divide by the total
//! width, so they go through [`Borders::ratios`], which rejects a
//! non-positive width with [`ChartError::InvalidGeometry`].
//!
//! ## Configuration
//! Every field has a default and can be overridden from YAML:
//! ```rust
//! use dynachart::Borders;
//!
//! let borders = Borders::from_yaml("side-width-ratio: 0.75\ncenter: 3.0\n")?;
//! assert_eq!(borders.side_width_ratio, 0.75);
//! assert_eq!(borders.front_border, 2.8);
//! # Ok::<(), dynachart::ChartError>(())
//! ```

use crate::error::ChartError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Borders {
    /// Lane-local center of the front lane
    pub center: f64,
    pub front_border: f64,
    pub front_visible_limit: f64,
    pub side_border: f64,
    pub side_visible_cap: f64,
    pub side_visible_limit: f64,
    /// Scale applied to side lane coordinates
    pub side_width_ratio: f64,
    pub note_width_bias: f64,
    /// Narrowest note width before side scaling
    pub note_width_limit: f64,
}

impl Default for Borders {
    fn default() -> Self {
        Self {
            center: 2.5,
            front_border: 2.8,
            front_visible_limit: 3.2,
            side_border: -0.2,
            side_visible_cap: 6.5,
            side_visible_limit: -1.3,
            side_width_ratio: 0.5,
            note_width_bias: 0.1,
            note_width_limit: 0.2,
        }
    }
}

/// Every border line as a fraction of the total width
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderRatios {
    pub left_cap: f64,
    pub left_border: f64,
    pub front_left: f64,
    pub front_right: f64,
    pub right_border: f64,
    pub right_cap: f64,
}

impl BorderRatios {
    /// The four inner column lines, left to right
    pub fn columns(&self) -> [f64; 4] {
        [
            self.left_border,
            self.front_left,
            self.front_right,
            self.right_border,
        ]
    }
}

impl Borders {
    /// Load a configuration from YAML. Missing keys keep their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ChartError> {
        serde_yaml::from_str(content).map_err(|e| ChartError::InvalidConfig(e.to_string()))
    }

    pub fn left_cap_line(&self) -> f64 {
        0.0
    }

    pub fn left_border_line(&self) -> f64 {
        self.side_width_ratio * (self.side_visible_cap - self.side_border)
    }

    pub fn front_left_line(&self) -> f64 {
        self.side_span() + (self.front_visible_limit - self.front_border)
    }

    pub fn right_cap_line(&self) -> f64 {
        2.0 * (self.side_span() + self.front_visible_limit)
    }

    /// Total width, same as [`Borders::right_cap_line`]
    pub fn width(&self) -> f64 {
        self.right_cap_line()
    }

    pub fn right_border_line(&self) -> f64 {
        self.right_cap_line() - self.left_border_line()
    }

    pub fn front_right_line(&self) -> f64 {
        self.right_cap_line() - self.front_left_line()
    }

    // visible extent of one side lane after scaling
    fn side_span(&self) -> f64 {
        self.side_width_ratio * (self.side_visible_cap - self.side_visible_limit)
    }

    /// Total width, checked to be usable as a divisor.
    pub fn checked_width(&self) -> Result<f64, ChartError> {
        let width = self.width();
        if width.is_finite() && width > 0.0 {
            Ok(width)
        } else {
            Err(ChartError::InvalidGeometry { width })
        }
    }

    /// All line ratios against the total width.
    ///
    /// # Errors
    /// [`ChartError::InvalidGeometry`] when the total width is not positive.
    pub fn ratios(&self) -> Result<BorderRatios, ChartError> {
        let width = self.checked_width()?;
        Ok(BorderRatios {
            left_cap: self.left_cap_line() / width,
            left_border: self.left_border_line() / width,
            front_left: self.front_left_line() / width,
            front_right: self.front_right_line() / width,
            right_border: self.right_border_line() / width,
            right_cap: 1.0,
        })
    }

    /// Visual width of a note before side scaling.
    ///
    /// Never below `note_width_limit`. Widths close to `note_width_bias` are
    /// pushed down symmetrically from either side.
    pub fn effective_width(&self, width: f64) -> f64 {
        self.note_width_limit
            .max(width - self.note_width_bias)
            .max(self.note_width_bias - width)
    }
}
