use crate::{
    foundation::core::{ShapeState, Size, Tick},
    foundation::error::{TickframeError, TickframeResult},
    timeline::delta::{Delta, PropertyKind},
};

/// A `[start, end]` span plus the property deltas that hold at `end`.
///
/// The source value of every delta is the shape's state at `start`, which is not stored
/// here; see [`MotionList::source_values`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MotionInterval {
    start: Tick,
    end: Tick,
    #[serde(default)]
    deltas: Vec<Delta>,
}

impl MotionInterval {
    /// Create an interval with no deltas. Fails if `end < start`.
    pub fn new(start: Tick, end: Tick) -> TickframeResult<Self> {
        if end < start {
            return Err(TickframeError::validation(format!(
                "motion end {end} is before start {start}"
            )));
        }
        Ok(Self {
            start,
            end,
            deltas: Vec::new(),
        })
    }

    /// Builder-style variant of [`MotionInterval::put_delta`].
    pub fn with_delta(mut self, delta: Delta) -> Self {
        self.put_delta(delta);
        self
    }

    pub fn start(&self) -> Tick {
        self.start
    }

    pub fn end(&self) -> Tick {
        self.end
    }

    pub fn duration(&self) -> u64 {
        self.start.span_to(self.end)
    }

    /// A zero-length interval: a lone keyframe with no motion of its own.
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, tick: Tick) -> bool {
        self.start <= tick && tick <= self.end
    }

    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    pub fn delta(&self, kind: PropertyKind) -> Option<&Delta> {
        self.deltas.iter().find(|d| d.kind() == kind)
    }

    /// Wire strings of the deltas, in insertion order (`"move 10 20"`, ...).
    pub fn delta_strings(&self) -> Vec<String> {
        self.deltas.iter().map(ToString::to_string).collect()
    }

    /// Attach a delta. A delta of the same kind already present is replaced in place.
    pub fn put_delta(&mut self, delta: Delta) {
        match self.deltas.iter_mut().find(|d| d.kind() == delta.kind()) {
            Some(slot) => *slot = delta,
            None => self.deltas.push(delta),
        }
    }

    /// `state` with every delta of this interval applied.
    pub fn apply(&self, mut state: ShapeState) -> ShapeState {
        for d in &self.deltas {
            d.apply_to(&mut state);
        }
        state
    }

    /// Check the invariants a deserialized interval may not have been built with.
    fn validate(&self) -> TickframeResult<()> {
        if self.end < self.start {
            return Err(TickframeError::validation(format!(
                "motion end {} is before start {}",
                self.end, self.start
            )));
        }
        for (i, d) in self.deltas.iter().enumerate() {
            if let Delta::Size { width, height } = *d {
                Size::new(width, height)?;
            }
            if self.deltas[..i].iter().any(|prev| prev.kind() == d.kind()) {
                return Err(TickframeError::validation(format!(
                    "motion [{}, {}] has more than one '{}' delta",
                    self.start,
                    self.end,
                    d.kind()
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn set_start(&mut self, start: Tick) {
        self.start = start;
    }

    pub(crate) fn set_end(&mut self, end: Tick) {
        self.end = end;
    }
}

/// One shape's motions, kept sorted by start and non-overlapping.
///
/// Consecutive intervals may share an endpoint (`[0,10]`, `[10,20]`); that is how a
/// contiguous chain is stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MotionList {
    intervals: Vec<MotionInterval>,
}

impl MotionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from arbitrary intervals, rejecting overlaps.
    pub fn from_intervals(intervals: impl IntoIterator<Item = MotionInterval>) -> TickframeResult<Self> {
        let mut list = Self::new();
        for m in intervals {
            list.insert(m)?;
        }
        Ok(list)
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn intervals(&self) -> &[MotionInterval] {
        &self.intervals
    }

    pub fn get(&self, index: usize) -> Option<&MotionInterval> {
        self.intervals.get(index)
    }

    pub fn first(&self) -> Option<&MotionInterval> {
        self.intervals.first()
    }

    pub fn last(&self) -> Option<&MotionInterval> {
        self.intervals.last()
    }

    /// Latest end tick, or zero for an empty list.
    pub fn end_tick(&self) -> Tick {
        self.last().map_or(Tick::ZERO, MotionInterval::end)
    }

    /// Insert in start order. Fails if the interval is malformed or overlaps an
    /// existing one.
    pub fn insert(&mut self, interval: MotionInterval) -> TickframeResult<usize> {
        interval.validate()?;
        let key = (interval.start, interval.end);
        let idx = self
            .intervals
            .partition_point(|m| (m.start, m.end) <= key);

        let overlaps_prev = idx
            .checked_sub(1)
            .map(|p| &self.intervals[p])
            .is_some_and(|prev| (prev.start, prev.end) == key || prev.end > interval.start);
        let overlaps_next = self
            .intervals
            .get(idx)
            .is_some_and(|next| interval.end > next.start);
        if overlaps_prev || overlaps_next {
            return Err(TickframeError::validation(format!(
                "motion [{}, {}] overlaps an existing motion",
                interval.start, interval.end
            )));
        }

        self.intervals.insert(idx, interval);
        Ok(idx)
    }

    /// Attach a delta to an interval that is already a member of this list.
    pub fn append(&mut self, index: usize, delta: Delta) -> TickframeResult<()> {
        let m = self.intervals.get_mut(index).ok_or_else(|| {
            TickframeError::not_found(format!("no motion at index {index}"))
        })?;
        m.put_delta(delta);
        Ok(())
    }

    /// Index of the interval containing `tick`. When two intervals touch at `tick`
    /// the later one is returned; both resolve to the same state.
    pub fn find_containing(&self, tick: Tick) -> Option<usize> {
        let idx = self.intervals.partition_point(|m| m.start <= tick);
        let candidate = idx.checked_sub(1)?;
        (self.intervals[candidate].end >= tick).then_some(candidate)
    }

    /// Index of the first interval ending exactly at `tick`.
    pub fn find_ending_at(&self, tick: Tick) -> Option<usize> {
        self.intervals.iter().position(|m| m.end == tick)
    }

    /// State a shape is in at the start of interval `index`: `origin` with every delta
    /// of every earlier interval applied in order.
    pub fn source_values(&self, index: usize, origin: ShapeState) -> ShapeState {
        self.intervals
            .iter()
            .take(index)
            .fold(origin, |state, m| m.apply(state))
    }

    /// State after every interval has completed.
    pub fn final_values(&self, origin: ShapeState) -> ShapeState {
        self.source_values(self.intervals.len(), origin)
    }

    /// Sorted by start, no two intervals overlapping, every interval `start <= end`.
    pub fn is_well_formed(&self) -> bool {
        self.intervals.iter().all(|m| m.start <= m.end)
            && self
                .intervals
                .windows(2)
                .all(|w| (w[0].start, w[0].end) < (w[1].start, w[1].end) && w[0].end <= w[1].start)
    }

    pub(crate) fn intervals_mut(&mut self) -> &mut Vec<MotionInterval> {
        &mut self.intervals
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/motion.rs"]
mod tests;
