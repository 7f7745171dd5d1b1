use std::fmt;

use crate::foundation::error::{TickframeError, TickframeResult};

/// Discrete timeline position. Ticks are never negative.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Tick(pub u64);

impl Tick {
    /// Tick zero.
    pub const ZERO: Tick = Tick(0);

    /// Distance from `self` to a later tick, zero if `later` is earlier.
    pub fn span_to(self, later: Tick) -> u64 {
        later.0.saturating_sub(self.0)
    }
}

impl TryFrom<i64> for Tick {
    type Error = TickframeError;

    fn try_from(value: i64) -> TickframeResult<Self> {
        u64::try_from(value)
            .map(Tick)
            .map_err(|_| TickframeError::validation(format!("tick must be >= 0, got {value}")))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair. `(-1, -1)` is the "not currently present" sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Sentinel reported for shapes that are outside all of their motions.
    pub const INVISIBLE: Size = Size {
        width: -1,
        height: -1,
    };

    pub fn new(width: i32, height: i32) -> TickframeResult<Self> {
        if width < 0 || height < 0 {
            return Err(TickframeError::validation(format!(
                "width and height must be >= 0, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn is_invisible(self) -> bool {
        self == Self::INVISIBLE
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from untrusted integer components, each of which must be in `[0, 255]`.
    pub fn from_components(r: i32, g: i32, b: i32) -> TickframeResult<Self> {
        fn channel(v: i32) -> Option<u8> {
            u8::try_from(v).ok()
        }
        match (channel(r), channel(g), channel(b)) {
            (Some(r), Some(g), Some(b)) => Ok(Self { r, g, b }),
            _ => Err(TickframeError::validation(format!(
                "color components must be in [0, 255], got ({r}, {g}, {b})"
            ))),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Full geometric + color state of a shape: the 7 channels `x y w h r g b`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShapeState {
    pub position: Position,
    pub size: Size,
    pub color: Rgb,
}

impl ShapeState {
    /// Validated constructor used for declared (original) shape states.
    pub fn new(x: i32, y: i32, w: i32, h: i32, r: i32, g: i32, b: i32) -> TickframeResult<Self> {
        Ok(Self {
            position: Position::new(x, y),
            size: Size::new(w, h)?,
            color: Rgb::from_components(r, g, b)?,
        })
    }

    pub fn is_visible(&self) -> bool {
        !self.size.is_invisible()
    }

    /// Same state with the invisible sentinel size.
    pub fn hidden(self) -> Self {
        Self {
            size: Size::INVISIBLE,
            ..self
        }
    }

    /// Channels in wire order: `x y w h r g b`.
    pub fn channels(&self) -> [i32; 7] {
        [
            self.position.x,
            self.position.y,
            self.size.width,
            self.size.height,
            i32::from(self.color.r),
            i32::from(self.color.g),
            i32::from(self.color.b),
        ]
    }
}

impl fmt::Display for ShapeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, w, h, r, g, b] = self.channels();
        write!(f, "{x} {y} {w} {h} {r} {g} {b}")
    }
}

/// Canvas bounding box supplied by the loader. Not validated beyond its arity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CanvasBounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build bounds from a `[x, y, width, height, ..]` slice.
    pub fn from_slice(values: &[i32]) -> TickframeResult<Self> {
        match values {
            [x, y, width, height, ..] => Ok(Self::new(*x, *y, *width, *height)),
            _ => Err(TickframeError::validation(format!(
                "canvas bounds need 4 values, got {}",
                values.len()
            ))),
        }
    }
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self::new(0, 0, 1500, 1500)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
