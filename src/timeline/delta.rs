use std::{fmt, str::FromStr};

use crate::foundation::{
    core::{Position, Rgb, ShapeState, Size},
    error::{TickframeError, TickframeResult},
};

/// Which group of channels a [`Delta`] targets.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Position `(x, y)`.
    Move,
    /// Size `(width, height)`.
    Size,
    /// Color `(r, g, b)`.
    Color,
}

impl PropertyKind {
    /// Number of integer parameters a delta of this kind takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Move | Self::Size => 2,
            Self::Color => 3,
        }
    }

    /// Wire name of the property (`move`, `size`, `color`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Size => "size",
            Self::Color => "color",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PropertyKind {
    type Err = TickframeError;

    fn from_str(s: &str) -> TickframeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "move" => Ok(Self::Move),
            "size" => Ok(Self::Size),
            "color" => Ok(Self::Color),
            other => Err(TickframeError::validation(format!(
                "unknown property kind '{other}'"
            ))),
        }
    }
}

/// Absolute target value of one property group at the end of a motion interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Delta {
    /// Move to `(x, y)`.
    Move {
        /// Target x.
        x: i32,
        /// Target y.
        y: i32,
    },
    /// Resize to `(width, height)`.
    Size {
        /// Target width.
        width: i32,
        /// Target height.
        height: i32,
    },
    /// Recolor to `(r, g, b)`.
    Color {
        /// Target red.
        r: u8,
        /// Target green.
        g: u8,
        /// Target blue.
        b: u8,
    },
}

impl Delta {
    /// Build a delta from a property kind and its raw parameters.
    ///
    /// The parameter count must match [`PropertyKind::arity`] exactly; sizes must be
    /// non-negative and colors must be in `[0, 255]`.
    pub fn from_values(kind: PropertyKind, values: &[i32]) -> TickframeResult<Self> {
        if values.len() != kind.arity() {
            return Err(TickframeError::validation(format!(
                "'{kind}' takes {} parameters, got {}",
                kind.arity(),
                values.len()
            )));
        }
        match kind {
            PropertyKind::Move => Ok(Self::Move {
                x: values[0],
                y: values[1],
            }),
            PropertyKind::Size => {
                let size = Size::new(values[0], values[1])?;
                Ok(Self::Size {
                    width: size.width,
                    height: size.height,
                })
            }
            PropertyKind::Color => {
                let c = Rgb::from_components(values[0], values[1], values[2])?;
                Ok(Self::Color {
                    r: c.r,
                    g: c.g,
                    b: c.b,
                })
            }
        }
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Move { .. } => PropertyKind::Move,
            Self::Size { .. } => PropertyKind::Size,
            Self::Color { .. } => PropertyKind::Color,
        }
    }

    /// Overwrite the channels this delta targets.
    pub fn apply_to(&self, state: &mut ShapeState) {
        match *self {
            Self::Move { x, y } => state.position = Position::new(x, y),
            Self::Size { width, height } => state.size = Size { width, height },
            Self::Color { r, g, b } => state.color = Rgb::new(r, g, b),
        }
    }

    /// Delta carrying `state`'s current value for the given property group.
    pub fn capture(kind: PropertyKind, state: &ShapeState) -> Self {
        match kind {
            PropertyKind::Move => Self::Move {
                x: state.position.x,
                y: state.position.y,
            },
            PropertyKind::Size => Self::Size {
                width: state.size.width,
                height: state.size.height,
            },
            PropertyKind::Color => Self::Color {
                r: state.color.r,
                g: state.color.g,
                b: state.color.b,
            },
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { x, y } => write!(f, "move {x} {y}"),
            Self::Size { width, height } => write!(f, "size {width} {height}"),
            Self::Color { r, g, b } => write!(f, "color {r} {g} {b}"),
        }
    }
}

impl FromStr for Delta {
    type Err = TickframeError;

    /// Parse the wire form (`"move 10 20"`), the inverse of `Display`.
    fn from_str(s: &str) -> TickframeResult<Self> {
        let mut parts = s.split_whitespace();
        let kind: PropertyKind = parts
            .next()
            .ok_or_else(|| TickframeError::validation("empty delta"))?
            .parse()?;
        let values = parts
            .map(|p| {
                p.parse::<i32>().map_err(|_| {
                    TickframeError::validation(format!("'{p}' is not an integer in delta '{s}'"))
                })
            })
            .collect::<TickframeResult<Vec<_>>>()?;
        Self::from_values(kind, &values)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/delta.rs"]
mod tests;
