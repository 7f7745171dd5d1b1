use crate::{
    foundation::core::{Position, Rgb, ShapeState, Size, Tick},
    timeline::delta::Delta,
};

/// Linearly interpolate one channel from `previous` (at `start`) to `target` (at `end`).
///
/// Equal endpoints short-circuit, which also guards the zero-length case. For
/// `start == end` the target wins. The blend is computed in `f64` and truncated toward
/// zero. `start <= end` is the caller's responsibility.
pub fn evaluate(previous: i32, target: i32, start: Tick, end: Tick, tick: Tick) -> i32 {
    if previous == target {
        return previous;
    }
    if tick >= end {
        return target;
    }
    if tick <= start {
        return previous;
    }

    let duration = (end.0 - start.0) as f64;
    let before = (end.0 - tick.0) as f64;
    let after = (tick.0 - start.0) as f64;
    (f64::from(previous) * before / duration + f64::from(target) * after / duration) as i32
}

/// Apply one delta to `state` at `tick`, interpolating from the values already in
/// `state` (the interval's source values).
pub fn interpolate_delta(
    delta: &Delta,
    state: &mut ShapeState,
    start: Tick,
    end: Tick,
    tick: Tick,
) {
    let lerp = |p: i32, t: i32| evaluate(p, t, start, end, tick);
    match *delta {
        Delta::Move { x, y } => {
            state.position = Position::new(lerp(state.position.x, x), lerp(state.position.y, y));
        }
        Delta::Size { width, height } => {
            state.size = Size {
                width: lerp(state.size.width, width),
                height: lerp(state.size.height, height),
            };
        }
        Delta::Color { r, g, b } => {
            // Both endpoints are in [0, 255], so the blend is too.
            let c = |p: u8, t: u8| lerp(i32::from(p), i32::from(t)).clamp(0, 255) as u8;
            state.color = Rgb::new(c(state.color.r, r), c(state.color.g, g), c(state.color.b, b));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/interpolate.rs"]
mod tests;
