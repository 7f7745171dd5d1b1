use std::collections::BTreeMap;

use crate::{
    foundation::core::{ShapeState, Tick},
    foundation::error::{TickframeError, TickframeResult},
    shape::kind::ShapeKind,
    timeline::motion::MotionList,
};

/// Immutable copy of a shape's state handed across the engine boundary.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShapeSnapshot {
    /// Shape identifier.
    pub id: String,
    /// Shape kind.
    pub kind: ShapeKind,
    /// Position, size and color. Size is `(-1, -1)` while the shape is not present.
    pub state: ShapeState,
}

impl ShapeSnapshot {
    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// See [`ShapeKind::area_bounds`].
    pub fn area_bounds(&self) -> Option<kurbo::Rect> {
        self.kind.area_bounds(&self.state)
    }
}

/// Everything the engine holds for one shape.
#[derive(Clone, Debug)]
pub(crate) struct ShapeRecord {
    pub(crate) id: String,
    pub(crate) kind: ShapeKind,
    /// State at declaration time; never changes.
    pub(crate) declared: ShapeState,
    /// State produced by the most recent evaluation (or `declared` after a reset).
    pub(crate) live: ShapeState,
    pub(crate) motions: MotionList,
    /// Tick of a removed birth keyframe. From here until the next surviving interval the
    /// shape is reported invisible.
    pub(crate) vanished_from: Option<Tick>,
}

impl ShapeRecord {
    fn snapshot_of(&self, state: ShapeState) -> ShapeSnapshot {
        ShapeSnapshot {
            id: self.id.clone(),
            kind: self.kind,
            state,
        }
    }

    pub(crate) fn live_snapshot(&self) -> ShapeSnapshot {
        self.snapshot_of(self.live)
    }

    pub(crate) fn declared_snapshot(&self) -> ShapeSnapshot {
        self.snapshot_of(self.declared)
    }
}

/// Owns every shape by identifier, remembering declaration order.
#[derive(Clone, Debug, Default)]
pub struct ShapeRegistry {
    /// Records in declaration order.
    shapes: Vec<ShapeRecord>,
    /// Position of each id in `shapes`.
    index: BTreeMap<String, usize>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Declare a shape from raw channel values.
    ///
    /// Fails if `id` is taken or malformed, `w < 0`, `h < 0`, or a color component is
    /// outside `[0, 255]`.
    #[allow(clippy::too_many_arguments)]
    pub fn declare_shape(
        &mut self,
        kind: ShapeKind,
        id: &str,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        r: i32,
        g: i32,
        b: i32,
    ) -> TickframeResult<()> {
        let state = ShapeState::new(x, y, w, h, r, g, b)?;
        self.declare(kind, id, state)
    }

    /// Declare a shape from an already-built state.
    pub fn declare(&mut self, kind: ShapeKind, id: &str, state: ShapeState) -> TickframeResult<()> {
        validate_id(id)?;
        if self.index.contains_key(id) {
            return Err(TickframeError::validation(format!(
                "shape '{id}' is already declared"
            )));
        }
        if state.size.width < 0 || state.size.height < 0 {
            return Err(TickframeError::validation(format!(
                "shape '{id}' needs a non-negative size"
            )));
        }

        self.index.insert(id.to_string(), self.shapes.len());
        self.shapes.push(ShapeRecord {
            id: id.to_string(),
            kind,
            declared: state,
            live: state,
            motions: MotionList::new(),
            vanished_from: None,
        });
        tracing::debug!(id, kind = kind.name(), "declared shape");
        Ok(())
    }

    /// Remove a shape together with all of its motions.
    pub fn remove_shape(&mut self, id: &str) -> TickframeResult<()> {
        let idx = self
            .index
            .remove(id)
            .ok_or_else(|| TickframeError::unknown_shape(id))?;
        self.shapes.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        tracing::debug!(id, "removed shape");
        Ok(())
    }

    /// Copy of the shape's live state.
    pub fn shape(&self, id: &str) -> TickframeResult<ShapeSnapshot> {
        self.record(id).map(ShapeRecord::live_snapshot)
    }

    /// Copy of the shape's declared (original) state.
    pub fn declared_shape(&self, id: &str) -> TickframeResult<ShapeSnapshot> {
        self.record(id).map(ShapeRecord::declared_snapshot)
    }

    /// Restore every shape's live state to its declared state.
    pub fn reset_shapes(&mut self) {
        for rec in &mut self.shapes {
            rec.live = rec.declared;
        }
    }

    /// Identifiers in declaration order.
    pub fn ids(&self) -> Vec<String> {
        self.shapes.iter().map(|rec| rec.id.clone()).collect()
    }

    pub(crate) fn record(&self, id: &str) -> TickframeResult<&ShapeRecord> {
        self.index
            .get(id)
            .map(|&idx| &self.shapes[idx])
            .ok_or_else(|| TickframeError::unknown_shape(id))
    }

    pub(crate) fn record_mut(&mut self, id: &str) -> TickframeResult<&mut ShapeRecord> {
        let idx = *self
            .index
            .get(id)
            .ok_or_else(|| TickframeError::unknown_shape(id))?;
        Ok(&mut self.shapes[idx])
    }

    /// Records in declaration order.
    pub(crate) fn records(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.shapes.iter()
    }

    /// Mutable records in declaration order.
    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut ShapeRecord> {
        self.shapes.iter_mut()
    }

    /// Restore a shape's vanish marker, e.g. when loading a saved animation.
    pub(crate) fn set_vanished_from(&mut self, id: &str, tick: Option<Tick>) -> TickframeResult<()> {
        self.record_mut(id)?.vanished_from = tick;
        Ok(())
    }
}

fn validate_id(id: &str) -> TickframeResult<()> {
    if id.is_empty() || id.chars().any(char::is_whitespace) {
        return Err(TickframeError::validation(format!(
            "shape id must be a non-empty word, got '{id}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/shape/registry.rs"]
mod tests;
