use std::collections::BTreeMap;

use crate::{
    foundation::core::{CanvasBounds, ShapeState, Tick},
    foundation::error::{TickframeError, TickframeResult},
    model::animation::Animation,
    shape::kind::ShapeKind,
    timeline::{
        delta::{Delta, PropertyKind},
        motion::MotionInterval,
    },
};

/// Assembles an [`Animation`] from absolute before/after transitions, the form
/// animation files are written in.
///
/// Shapes are declared by name and kind first; a shape enters the animation with the
/// "before" state of its first transition.
#[derive(Debug, Default)]
pub struct AnimationBuilder {
    animation: Animation,
    declarations: BTreeMap<String, ShapeKind>,
}

impl AnimationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(mut self, bounds: CanvasBounds) -> Self {
        self.animation.set_bounds(bounds);
        self
    }

    pub fn declare_shape(mut self, name: impl Into<String>, kind: ShapeKind) -> TickframeResult<Self> {
        let name = name.into();
        if self.declarations.contains_key(&name) {
            return Err(TickframeError::validation(format!(
                "duplicate shape declaration '{name}'"
            )));
        }
        self.declarations.insert(name, kind);
        Ok(self)
    }

    /// Add a transition from `before` at `t1` to `after` at `t2`.
    ///
    /// Only the property groups that differ become deltas; a transition where nothing
    /// changes still occupies its span.
    pub fn add_transition(
        mut self,
        name: &str,
        t1: Tick,
        before: ShapeState,
        t2: Tick,
        after: ShapeState,
    ) -> TickframeResult<Self> {
        self.ensure_present(name, before)?;

        let mut interval = MotionInterval::new(t1, t2)?;
        for kind in [PropertyKind::Move, PropertyKind::Size, PropertyKind::Color] {
            let target = Delta::capture(kind, &after);
            if Delta::capture(kind, &before) != target {
                interval.put_delta(target);
            }
        }
        self.animation.add_motion(name, interval)?;
        Ok(self)
    }

    /// Pin every property of `name` to `state` at `tick`.
    pub fn add_keyframe(mut self, name: &str, tick: Tick, state: ShapeState) -> TickframeResult<Self> {
        self.ensure_present(name, state)?;
        for kind in [PropertyKind::Move, PropertyKind::Size, PropertyKind::Color] {
            self.animation
                .add_keyframe_delta(name, tick, Delta::capture(kind, &state))?;
        }
        Ok(self)
    }

    /// Finish the animation. Declared shapes that never received a transition or
    /// keyframe have no state to start from and are left out.
    pub fn build(self) -> Animation {
        for name in self.declarations.keys() {
            if !self.animation.registry().contains(name) {
                tracing::warn!(name = name.as_str(), "declared shape has no motions; skipped");
            }
        }
        self.animation
    }

    fn ensure_present(&mut self, name: &str, initial: ShapeState) -> TickframeResult<()> {
        if self.animation.registry().contains(name) {
            return Ok(());
        }
        let kind = *self.declarations.get(name).ok_or_else(|| {
            TickframeError::not_found(format!("shape '{name}' was never declared"))
        })?;
        self.animation.declare(kind, name, initial)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/builder.rs"]
mod tests;
