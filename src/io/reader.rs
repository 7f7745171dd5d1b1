//! Loader for the textual animation format.
//!
//! ```text
//! # comments and blank lines are ignored
//! canvas 200 70 360 360
//! shape R rectangle
//! motion R 1 200 200 50 100 255 0 0    10 200 200 50 100 255 0 0
//! ```
//!
//! `motion` lines carry a start tick and a full `x y w h r g b` state, then an end tick
//! and the state reached there.

use std::io::Read;

use crate::{
    foundation::core::{CanvasBounds, ShapeState, Tick},
    foundation::error::{TickframeError, TickframeResult},
    model::{animation::Animation, builder::AnimationBuilder},
    shape::kind::ShapeKind,
};

/// Parse an animation from an in-memory string.
#[tracing::instrument(skip(input), fields(bytes = input.len()))]
pub fn parse_animation(input: &str) -> TickframeResult<Animation> {
    let mut builder = AnimationBuilder::new();
    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let content = raw.split('#').next().unwrap_or_default();
        let mut words = content.split_whitespace();
        let Some(keyword) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();
        builder = apply_line(builder, keyword, &args).map_err(|e| match e {
            TickframeError::Parse { .. } => e,
            other => TickframeError::parse(line_no, other.to_string()),
        })?;
    }
    let animation = builder.build();
    tracing::debug!(shapes = animation.registry().len(), "parsed animation");
    Ok(animation)
}

/// Parse an animation from any reader, e.g. an open file.
pub fn read_animation(mut reader: impl Read) -> TickframeResult<Animation> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| TickframeError::Other(anyhow::Error::new(e).context("read animation input")))?;
    parse_animation(&input)
}

fn apply_line(
    builder: AnimationBuilder,
    keyword: &str,
    args: &[&str],
) -> TickframeResult<AnimationBuilder> {
    match keyword {
        "canvas" => {
            let values = ints(expect_arity(keyword, args, 4)?)?;
            Ok(builder.bounds(CanvasBounds::from_slice(&values)?))
        }
        "shape" => {
            let args = expect_arity(keyword, args, 2)?;
            builder.declare_shape(args[0], args[1].parse::<ShapeKind>()?)
        }
        "motion" => {
            let args = expect_arity(keyword, args, 17)?;
            let name = args[0];
            let v = ints(&args[1..])?;
            let t1 = Tick::try_from(i64::from(v[0]))?;
            let before = ShapeState::new(v[1], v[2], v[3], v[4], v[5], v[6], v[7])?;
            let t2 = Tick::try_from(i64::from(v[8]))?;
            let after = ShapeState::new(v[9], v[10], v[11], v[12], v[13], v[14], v[15])?;
            builder.add_transition(name, t1, before, t2, after)
        }
        other => Err(TickframeError::validation(format!(
            "unknown directive '{other}'"
        ))),
    }
}

fn expect_arity<'a, 'b>(keyword: &str, args: &'a [&'b str], n: usize) -> TickframeResult<&'a [&'b str]> {
    if args.len() != n {
        return Err(TickframeError::validation(format!(
            "'{keyword}' takes {n} values, got {}",
            args.len()
        )));
    }
    Ok(args)
}

fn ints(args: &[&str]) -> TickframeResult<Vec<i32>> {
    args.iter()
        .map(|a| {
            a.parse::<i32>()
                .map_err(|_| TickframeError::validation(format!("'{a}' is not an integer")))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/io/reader.rs"]
mod tests;
