use crate::{
    eval::interpolate::interpolate_delta,
    foundation::core::{ShapeState, Tick},
    foundation::error::TickframeResult,
    shape::registry::{ShapeRecord, ShapeRegistry, ShapeSnapshot},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Every shape's state at one tick, in declaration order.
pub struct EvaluatedFrame {
    /// Evaluated tick.
    pub tick: Tick,
    /// One snapshot per declared shape, invisible ones included.
    pub shapes: Vec<ShapeSnapshot>,
}

/// Stateless evaluator from shape timelines to per-tick shape states.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(registry), fields(shapes = registry.len()))]
    /// Evaluate every shape at `tick`.
    pub fn eval_tick(registry: &ShapeRegistry, tick: Tick) -> EvaluatedFrame {
        let shapes = registry
            .records()
            .map(|rec| ShapeSnapshot {
                id: rec.id.clone(),
                kind: rec.kind,
                state: state_at(rec, tick),
            })
            .collect();
        EvaluatedFrame { tick, shapes }
    }

    /// Evaluate a single shape at `tick`.
    pub fn eval_shape(registry: &ShapeRegistry, id: &str, tick: Tick) -> TickframeResult<ShapeSnapshot> {
        let rec = registry.record(id)?;
        Ok(ShapeSnapshot {
            id: rec.id.clone(),
            kind: rec.kind,
            state: state_at(rec, tick),
        })
    }
}

/// State of one shape at `tick`.
///
/// - no motions: the declared state, visible
/// - before the first motion: the declared state, or invisible inside a vanish window
/// - inside a motion: source values interpolated toward that motion's deltas
/// - in a gap or past the last motion: invisible, other channels as last reached
pub(crate) fn state_at(rec: &ShapeRecord, tick: Tick) -> ShapeState {
    let motions = &rec.motions;
    let Some(first) = motions.first() else {
        return rec.declared;
    };

    if tick < first.start() {
        return match rec.vanished_from {
            Some(from) if from <= tick => rec.declared.hidden(),
            _ => rec.declared,
        };
    }

    match motions.find_containing(tick) {
        Some(idx) => {
            let m = &motions.intervals()[idx];
            let mut state = motions.source_values(idx, rec.declared);
            for d in m.deltas() {
                interpolate_delta(d, &mut state, m.start(), m.end(), tick);
            }
            state
        }
        None => {
            let completed = motions.intervals().partition_point(|m| m.end() < tick);
            motions.source_values(completed, rec.declared).hidden()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
