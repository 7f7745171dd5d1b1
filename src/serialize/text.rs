//! Plain-text description of an animation.
//!
//! ```text
//! canvas 200 70 360 360
//! shape R rectangle
//! motion R 10 200 200 50 100 255 0 0		50 300 300 50 100 255 0 0
//! ```
//!
//! The output is valid input for [`crate::io::reader::parse_animation`], and reloading it
//! reproduces each shape's [`motion_trace`]. Intervals without deltas and shapes without
//! motions are not written, so a reload can differ in between. Use
//! [`crate::model::document::AnimationDocument`] for a lossless copy.

use std::fmt::Write as _;

use crate::{
    foundation::core::{ShapeState, Tick},
    model::animation::Animation,
    timeline::motion::MotionList,
};

/// Before/after snapshots of one interval that changes at least one property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TraceEntry {
    pub start: Tick,
    pub before: ShapeState,
    pub end: Tick,
    pub after: ShapeState,
}

/// Running before/after trace of a timeline, seeded from the declared state.
/// Intervals without deltas advance nothing and are left out.
pub fn motion_trace(declared: ShapeState, motions: &MotionList) -> Vec<TraceEntry> {
    let mut current = declared;
    let mut trace = Vec::new();
    for m in motions.intervals() {
        if m.deltas().is_empty() {
            continue;
        }
        let before = current;
        current = m.apply(current);
        trace.push(TraceEntry {
            start: m.start(),
            before,
            end: m.end(),
            after: current,
        });
    }
    trace
}

/// Render the full text description.
#[tracing::instrument(skip(animation), fields(shapes = animation.registry().len()))]
pub fn describe(animation: &Animation) -> String {
    let mut out = String::new();
    if let Some(b) = animation.bounds() {
        let _ = writeln!(out, "canvas {} {} {} {}", b.x, b.y, b.width, b.height);
    }
    for rec in animation.registry().records() {
        let _ = writeln!(out, "shape {} {}", rec.id, rec.kind);
        for entry in motion_trace(rec.declared, &rec.motions) {
            let _ = writeln!(
                out,
                "motion {} {} {}\t\t{} {}",
                rec.id, entry.start, entry.before, entry.end, entry.after
            );
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/text.rs"]
mod tests;
