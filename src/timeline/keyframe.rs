//! Keyframe insertion and removal over a [`MotionList`].
//!
//! Both operations keep the list sorted and non-overlapping, and validate before they
//! mutate, so a failed call leaves the list untouched.

use crate::{
    eval::interpolate::interpolate_delta,
    foundation::core::{ShapeState, Tick},
    foundation::error::{TickframeError, TickframeResult},
    timeline::{
        delta::Delta,
        motion::{MotionInterval, MotionList},
    },
};

/// How an added keyframe was placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeEdit {
    /// The list was empty; a zero-length birth interval was created.
    Birth,
    /// A new interval was placed ahead of the first one (or replaced a lone birth).
    Prepended,
    /// A new interval was placed after the last one (or replaced a lone birth).
    Appended,
    /// The delta was attached to the interval already ending at the tick.
    Augmented,
    /// A gap was closed by a new interval ending at the tick.
    Bridged,
    /// An interval containing the tick was split in two.
    Split,
}

/// How a keyframe removal was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeRemoval {
    /// The shape has no motions; nothing to do.
    NoMotions,
    /// The first interval (the shape's first appearance) was dropped.
    Birth,
    /// The last interval was dropped.
    Trimmed,
    /// An interior interval was dropped and its neighbours stitched together.
    Stitched,
    /// A gap before the interval starting at the tick was closed.
    Rechained,
}

impl MotionList {
    /// Insert a keyframe carrying `delta` at `tick`.
    ///
    /// `origin` is the shape's declared state; it seeds the source values needed when an
    /// interval has to be split.
    pub fn add_keyframe(
        &mut self,
        tick: Tick,
        delta: Delta,
        origin: ShapeState,
    ) -> TickframeResult<KeyframeEdit> {
        let len = self.len();
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            let birth = MotionInterval::new(tick, tick)?.with_delta(delta);
            self.intervals_mut().push(birth);
            return Ok(KeyframeEdit::Birth);
        };
        let (first_start, first_instant) = (first.start(), first.is_instant());
        let last_end = last.end();

        if tick < first_start {
            let lead = MotionInterval::new(tick, first_start)?.with_delta(delta);
            let intervals = self.intervals_mut();
            if first_instant {
                intervals[0] = lead;
            } else {
                intervals.insert(0, lead);
            }
            return Ok(KeyframeEdit::Prepended);
        }

        if tick > last_end {
            let tail = MotionInterval::new(last_end, tick)?.with_delta(delta);
            let intervals = self.intervals_mut();
            if len == 1 && first_instant {
                intervals[0] = tail;
            } else {
                intervals.push(tail);
            }
            return Ok(KeyframeEdit::Appended);
        }

        if let Some(idx) = self.find_ending_at(tick) {
            self.append(idx, delta)?;
            return Ok(KeyframeEdit::Augmented);
        }

        let intervals = self.intervals();
        if let Some(k) =
            (1..len).find(|&k| intervals[k - 1].end() < tick && tick <= intervals[k].start())
        {
            let bridge = MotionInterval::new(intervals[k - 1].end(), tick)?.with_delta(delta);
            let intervals = self.intervals_mut();
            intervals[k].set_start(tick);
            intervals.insert(k, bridge);
            return Ok(KeyframeEdit::Bridged);
        }

        match self.find_containing(tick) {
            Some(idx) if self.intervals()[idx].start() < tick => {
                let head = self.split_head(idx, tick, delta, origin)?;
                let intervals = self.intervals_mut();
                intervals[idx].set_start(tick);
                intervals.insert(idx, head);
                Ok(KeyframeEdit::Split)
            }
            _ => Err(TickframeError::validation(format!(
                "a motion already starts at tick {tick}"
            ))),
        }
    }

    /// First half of interval `idx` split at `tick`: every property the interval changes,
    /// captured at its interpolated value at `tick`, then `delta` on top.
    fn split_head(
        &self,
        idx: usize,
        tick: Tick,
        delta: Delta,
        origin: ShapeState,
    ) -> TickframeResult<MotionInterval> {
        let whole = &self.intervals()[idx];
        let mut at_tick = self.source_values(idx, origin);
        for d in whole.deltas() {
            interpolate_delta(d, &mut at_tick, whole.start(), whole.end(), tick);
        }

        let mut head = MotionInterval::new(whole.start(), tick)?;
        for d in whole.deltas() {
            head.put_delta(Delta::capture(d.kind(), &at_tick));
        }
        head.put_delta(delta);
        Ok(head)
    }

    /// Remove the keyframe at `tick`.
    ///
    /// Fails with not-found when the list is non-empty and `tick` matches no keyframe.
    pub fn remove_keyframe(&mut self, tick: Tick) -> TickframeResult<KeyframeRemoval> {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return Ok(KeyframeRemoval::NoMotions);
        };
        let (first_start, last_end) = (first.start(), last.end());

        let intervals = self.intervals_mut();
        if tick == first_start {
            intervals.remove(0);
            return Ok(KeyframeRemoval::Birth);
        }
        if tick == last_end {
            intervals.pop();
            return Ok(KeyframeRemoval::Trimmed);
        }

        let mut outcome = None;
        for k in 0..intervals.len() {
            if k > 0 {
                let (prev_end, start) = (intervals[k - 1].end(), intervals[k].start());
                if tick == start && prev_end.span_to(start) > 1 {
                    intervals[k - 1].set_end(start);
                    outcome = Some(KeyframeRemoval::Rechained);
                }
            }

            if intervals[k].end() == tick {
                let start = intervals[k].start();
                if let Some(next) = intervals.get_mut(k + 1) {
                    next.set_start(start);
                }
                intervals.remove(k);
                return Ok(KeyframeRemoval::Stitched);
            }
        }

        outcome.ok_or_else(|| TickframeError::not_found(format!("no keyframe at tick {tick}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/keyframe.rs"]
mod tests;
