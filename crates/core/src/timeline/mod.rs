use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    schedule::{build_schedule, Segment, SegmentKind},
    Result,
};

/// A segment placed on the clip's time axis, covering `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub kind: SegmentKind,
}

impl Interval {
    pub fn contains(&self, position_seconds: f64) -> bool {
        self.start_seconds <= position_seconds && position_seconds < self.end_seconds
    }
}

/// Immutable interval list derived once from a schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    unit_seconds: f64,
    total_duration_seconds: f64,
    intervals: Vec<Interval>,
}

impl Timeline {
    pub fn new(segments: &[Segment], unit_seconds: f64) -> Self {
        let mut intervals = Vec::with_capacity(segments.len());
        let mut elapsed_units: u64 = 0;

        for segment in segments {
            let start_seconds = elapsed_units as f64 * unit_seconds;
            elapsed_units += u64::from(segment.units());
            intervals.push(Interval {
                start_seconds,
                end_seconds: elapsed_units as f64 * unit_seconds,
                kind: segment.kind,
            });
        }

        Self {
            unit_seconds,
            total_duration_seconds: elapsed_units as f64 * unit_seconds,
            intervals,
        }
    }

    pub fn from_message(message: &str, unit_seconds: f64) -> Self {
        Self::new(&build_schedule(message), unit_seconds)
    }

    pub fn total_duration_seconds(&self) -> f64 {
        self.total_duration_seconds
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Playback at or beyond the end of the message is the terminal condition.
    pub fn is_finished_at(&self, position_seconds: f64) -> bool {
        position_seconds >= self.total_duration_seconds
    }

    /// Light state at `position_seconds`.
    ///
    /// A position exactly on a boundary belongs to the interval that starts
    /// there. Positions outside `[0, total)` read as `Off`; callers are
    /// expected to handle the finished case before asking.
    pub fn light_state_at(&self, position_seconds: f64) -> SegmentKind {
        if position_seconds < 0.0 || position_seconds.is_nan() {
            return SegmentKind::Off;
        }

        let index = self
            .intervals
            .partition_point(|interval| interval.end_seconds <= position_seconds);

        self.intervals
            .get(index)
            .map(|interval| interval.kind)
            .unwrap_or(SegmentKind::Off)
    }

    /// Pretty JSON export, used to check the schedule against the audio encoder.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Restartable, cancellable repeating timer driven by the caller's clock.
///
/// Times are offsets from an arbitrary origin chosen by the host loop. A
/// caller that falls behind gets one tick, not a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    next_due: Option<Duration>,
}

impl PollTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arms the timer; the first tick fires one interval after `now`.
    pub fn start(&mut self, now: Duration) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Returns `true` when a tick is due at `now` and schedules the next one.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let missed = (now - due).as_nanos() / self.interval.as_nanos();
        let next = u32::try_from(missed + 1)
            .ok()
            .and_then(|ticks| self.interval.checked_mul(ticks))
            .and_then(|offset| due.checked_add(offset))
            .unwrap_or(now + self.interval);
        self.next_due = Some(next);
        true
    }
}
