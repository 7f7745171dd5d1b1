use crate::{
    eval::evaluator::{EvaluatedFrame, Evaluator, state_at},
    foundation::core::{CanvasBounds, ShapeState, Tick},
    foundation::error::TickframeResult,
    shape::{
        kind::ShapeKind,
        registry::{ShapeRegistry, ShapeSnapshot},
    },
    timeline::{
        delta::{Delta, PropertyKind},
        keyframe::{KeyframeEdit, KeyframeRemoval},
        motion::{MotionInterval, MotionList},
    },
};

/// A set of shapes, their motion timelines and the canvas they are drawn on.
///
/// This is the single entry point used by loaders, renderers and editors. Every query
/// hands out value copies; every edit either succeeds completely or leaves the
/// animation untouched.
#[derive(Clone, Debug, Default)]
pub struct Animation {
    registry: ShapeRegistry,
    bounds: Option<CanvasBounds>,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas bounds, if any were set.
    pub fn bounds(&self) -> Option<CanvasBounds> {
        self.bounds
    }

    /// Canvas bounds, falling back to [`CanvasBounds::default`].
    pub fn bounds_or_default(&self) -> CanvasBounds {
        self.bounds.unwrap_or_default()
    }

    pub fn set_bounds(&mut self, bounds: CanvasBounds) {
        self.bounds = Some(bounds);
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut ShapeRegistry {
        &mut self.registry
    }

    /// See [`ShapeRegistry::declare_shape`].
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
        self.registry.declare_shape(kind, id, x, y, w, h, r, g, b)
    }

    pub fn declare(&mut self, kind: ShapeKind, id: &str, state: ShapeState) -> TickframeResult<()> {
        self.registry.declare(kind, id, state)
    }

    /// Remove a shape and its motions.
    pub fn remove_shape(&mut self, id: &str) -> TickframeResult<()> {
        self.registry.remove_shape(id)
    }

    /// Snapshot of the shape's live state.
    pub fn shape(&self, id: &str) -> TickframeResult<ShapeSnapshot> {
        self.registry.shape(id)
    }

    pub fn declared_shape(&self, id: &str) -> TickframeResult<ShapeSnapshot> {
        self.registry.declared_shape(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.registry.ids()
    }

    /// Restore every shape to its declared state, e.g. before looping playback.
    pub fn reset_shapes(&mut self) {
        self.registry.reset_shapes();
    }

    /// Insert a fully formed interval into a shape's timeline.
    ///
    /// Fails if the shape is unknown or the interval overlaps an existing one.
    pub fn add_motion(&mut self, id: &str, interval: MotionInterval) -> TickframeResult<()> {
        let rec = self.registry.record_mut(id)?;
        let (start, end) = (interval.start().0, interval.end().0);
        let idx = rec.motions.insert(interval)?;
        tracing::debug!(id, start, end, idx, "added motion");
        Ok(())
    }

    /// A shape's timeline.
    pub fn motions_for(&self, id: &str) -> TickframeResult<&MotionList> {
        Ok(&self.registry.record(id)?.motions)
    }

    /// Add a keyframe from raw values (`[x, y]`, `[w, h]` or `[r, g, b]`).
    pub fn add_keyframe(
        &mut self,
        id: &str,
        kind: PropertyKind,
        tick: Tick,
        values: &[i32],
    ) -> TickframeResult<KeyframeEdit> {
        // Resolve the shape first so an unknown id wins over bad values.
        self.registry.record(id)?;
        let delta = Delta::from_values(kind, values)?;
        self.add_keyframe_delta(id, tick, delta)
    }

    pub fn add_keyframe_delta(
        &mut self,
        id: &str,
        tick: Tick,
        delta: Delta,
    ) -> TickframeResult<KeyframeEdit> {
        let rec = self.registry.record_mut(id)?;
        let edit = rec.motions.add_keyframe(tick, delta, rec.declared)?;
        // A new first keyframe at or before the marker ends the vanish window.
        let resets_marker = match edit {
            KeyframeEdit::Birth => true,
            KeyframeEdit::Prepended => rec.vanished_from.is_some_and(|from| tick <= from),
            _ => false,
        };
        if resets_marker {
            rec.vanished_from = None;
        }
        tracing::debug!(id, tick = tick.0, ?edit, "added keyframe");
        Ok(edit)
    }

    /// Remove the keyframe at `tick`. Removing a shape's first keyframe hides it from
    /// that tick until its next surviving motion.
    pub fn remove_keyframe(&mut self, id: &str, tick: Tick) -> TickframeResult<KeyframeRemoval> {
        let rec = self.registry.record_mut(id)?;
        let removal = rec.motions.remove_keyframe(tick)?;
        if removal == KeyframeRemoval::Birth {
            rec.vanished_from = Some(tick);
        }
        tracing::debug!(id, tick = tick.0, ?removal, "removed keyframe");
        Ok(removal)
    }

    /// Evaluate every shape at `tick`, store the result as each shape's live state and
    /// return the snapshots in declaration order.
    pub fn shapes_at(&mut self, tick: Tick) -> Vec<ShapeSnapshot> {
        self.registry
            .records_mut()
            .map(|rec| {
                rec.live = state_at(rec, tick);
                rec.live_snapshot()
            })
            .collect()
    }

    /// Read-only evaluation of every shape at `tick`.
    pub fn frame_at(&self, tick: Tick) -> EvaluatedFrame {
        Evaluator::eval_tick(&self.registry, tick)
    }

    /// Read-only evaluation of one shape at `tick`.
    pub fn state_at(&self, id: &str, tick: Tick) -> TickframeResult<ShapeSnapshot> {
        Evaluator::eval_shape(&self.registry, id, tick)
    }

    /// Latest motion end across all shapes, or zero when nothing moves.
    pub fn final_tick(&self) -> Tick {
        self.registry
            .records()
            .map(|rec| rec.motions.end_tick())
            .max()
            .unwrap_or(Tick::ZERO)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/animation.rs"]
mod tests;
