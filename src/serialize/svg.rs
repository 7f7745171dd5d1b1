use std::fmt::Write as _;

use crate::{
    foundation::core::ShapeState,
    foundation::error::{TickframeError, TickframeResult},
    model::animation::Animation,
    shape::kind::ShapeKind,
    timeline::{delta::Delta, motion::MotionInterval},
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Timing options for SVG output.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SvgOptions {
    /// Wall-clock milliseconds per tick.
    pub ms_per_tick: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            ms_per_tick: 1000.0,
        }
    }
}

impl SvgOptions {
    /// Options for playback at `ticks_per_second`.
    pub fn from_speed(ticks_per_second: u32) -> TickframeResult<Self> {
        if ticks_per_second == 0 {
            return Err(TickframeError::validation("speed must be > 0 ticks per second"));
        }
        Ok(Self {
            ms_per_tick: 1000.0 / f64::from(ticks_per_second),
        })
    }

    fn ms(&self, ticks: u64) -> f64 {
        ticks as f64 * self.ms_per_tick
    }
}

/// Render the animation as a standalone SVG document with SMIL animations.
#[tracing::instrument(skip(animation), fields(shapes = animation.registry().len()))]
pub fn to_svg(animation: &Animation, opts: &SvgOptions) -> String {
    let bounds = animation.bounds_or_default();
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg width="{w}" height="{h}" viewBox="{x} {y} {w} {h}" version="1.1" xmlns="{SVG_NS}">"#,
        x = bounds.x,
        y = bounds.y,
        w = bounds.width,
        h = bounds.height,
    );

    for rec in animation.registry().records() {
        let tag = rec.kind.svg_tag();
        out.push('\n');
        write_element_open(&mut out, &rec.id, rec.kind, &rec.declared);

        let mut current = rec.declared;
        for m in rec.motions.intervals() {
            let after = m.apply(current);
            write_interval(&mut out, rec.kind, m, &current, &after, opts);
            current = after;
        }
        let _ = writeln!(out, "</{tag}>");
    }

    out.push_str("\n</svg>\n");
    out
}

fn write_element_open(out: &mut String, id: &str, kind: ShapeKind, state: &ShapeState) {
    let attrs = kind.svg_attributes();
    let _ = writeln!(
        out,
        r#"<{tag} id="{id}" {ax}="{x}" {ay}="{y}" {aw}="{w}" {ah}="{h}" fill="{fill}" visibility="visible">"#,
        tag = kind.svg_tag(),
        id = escape_attr(id),
        ax = attrs.x,
        ay = attrs.y,
        aw = attrs.width,
        ah = attrs.height,
        x = state.position.x,
        y = state.position.y,
        w = kind.svg_extent(state.size.width),
        h = kind.svg_extent(state.size.height),
        fill = state.color,
    );
}

/// One directive per channel that `m` actually changes.
fn write_interval(
    out: &mut String,
    kind: ShapeKind,
    m: &MotionInterval,
    before: &ShapeState,
    after: &ShapeState,
    opts: &SvgOptions,
) {
    let attrs = kind.svg_attributes();
    let mut changes: Vec<(&'static str, String, String)> = Vec::new();
    for d in m.deltas() {
        match d {
            Delta::Move { .. } => {
                push_change(&mut changes, attrs.x, before.position.x, after.position.x);
                push_change(&mut changes, attrs.y, before.position.y, after.position.y);
            }
            Delta::Size { .. } => {
                push_change(
                    &mut changes,
                    attrs.width,
                    kind.svg_extent(before.size.width),
                    kind.svg_extent(after.size.width),
                );
                push_change(
                    &mut changes,
                    attrs.height,
                    kind.svg_extent(before.size.height),
                    kind.svg_extent(after.size.height),
                );
            }
            Delta::Color { .. } => {
                if before.color != after.color {
                    changes.push(("fill", before.color.to_string(), after.color.to_string()));
                }
            }
        }
    }

    let begin = opts.ms(m.start().0);
    for (attr, from, to) in changes {
        if m.is_instant() {
            let _ = writeln!(
                out,
                r#"    <set attributeType="xml" begin="{begin}ms" attributeName="{attr}" to="{to}" fill="freeze" />"#
            );
        } else {
            let dur = opts.ms(m.duration());
            let _ = writeln!(
                out,
                r#"    <animate attributeType="xml" begin="{begin}ms" dur="{dur}ms" attributeName="{attr}" from="{from}" to="{to}" fill="freeze" />"#
            );
        }
    }
}

fn push_change(changes: &mut Vec<(&'static str, String, String)>, attr: &'static str, from: i32, to: i32) {
    if from != to {
        changes.push((attr, from.to_string(), to.to_string()));
    }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/svg.rs"]
mod tests;
