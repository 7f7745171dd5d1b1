use std::{fmt, str::FromStr};

use kurbo::Shape as _;

use crate::foundation::{
    core::ShapeState,
    error::{TickframeError, TickframeResult},
};

/// Closed set of supported shape kinds.
///
/// Everything that differs per kind (names, SVG attribute mapping, geometry) lives on
/// this enum, so adding a kind means adding a variant and filling in these methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle; position is its top-left corner.
    Rectangle,
    /// Axis-aligned ellipse; position is its center, size its diameters.
    Ellipse,
}

/// SVG attribute names for the position and size channels of a shape kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SvgAttributes {
    pub x: &'static str,
    pub y: &'static str,
    pub width: &'static str,
    pub height: &'static str,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
        }
    }

    pub fn svg_tag(self) -> &'static str {
        match self {
            Self::Rectangle => "rect",
            Self::Ellipse => "ellipse",
        }
    }

    pub fn svg_attributes(self) -> SvgAttributes {
        match self {
            Self::Rectangle => SvgAttributes {
                x: "x",
                y: "y",
                width: "width",
                height: "height",
            },
            Self::Ellipse => SvgAttributes {
                x: "cx",
                y: "cy",
                width: "rx",
                height: "ry",
            },
        }
    }

    /// Value written to the SVG size attributes for a width or height channel.
    pub fn svg_extent(self, extent: i32) -> i32 {
        match self {
            Self::Rectangle => extent,
            Self::Ellipse => extent / 2,
        }
    }

    /// Axis-aligned area covered by a shape in `state`; `None` while it is invisible.
    pub fn area_bounds(self, state: &ShapeState) -> Option<kurbo::Rect> {
        if !state.is_visible() {
            return None;
        }
        let x = f64::from(state.position.x);
        let y = f64::from(state.position.y);
        let w = f64::from(state.size.width);
        let h = f64::from(state.size.height);
        Some(match self {
            Self::Rectangle => kurbo::Rect::new(x, y, x + w, y + h),
            Self::Ellipse => kurbo::Rect::new(x - w / 2.0, y - h / 2.0, x + w / 2.0, y + h / 2.0),
        })
    }

    /// Painted area of a shape in `state`; zero while it is invisible.
    pub fn area(self, state: &ShapeState) -> f64 {
        let Some(bounds) = self.area_bounds(state) else {
            return 0.0;
        };
        match self {
            Self::Rectangle => bounds.area(),
            Self::Ellipse => kurbo::Ellipse::from_rect(bounds).area(),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = TickframeError;

    fn from_str(s: &str) -> TickframeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "ellipse" => Ok(Self::Ellipse),
            other => Err(TickframeError::validation(format!(
                "unsupported shape kind '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/kind.rs"]
mod tests;
