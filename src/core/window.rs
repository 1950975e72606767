use serde::{Deserialize, Serialize};

use crate::core::interval::IntervalChooser;
use crate::error::{SyncError, SyncResult};

/// Which of the two window definitions is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowMode {
    /// Duration back from "now", recomputed against the clock on each evaluation.
    Rolling,
    /// Fixed endpoints, independent of current time.
    Absolute,
}

/// Raw time fields extracted from a query, already coerced to numbers.
///
/// Zero means absent or unparseable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowProbe {
    pub from: i64,
    pub to: i64,
    pub last: i64,
}

/// Normalized time window.
///
/// Exactly one definition holds at a time: `Rolling` carries a positive
/// duration with derived bounds, `Absolute` carries fixed bounds with a zero
/// duration. Constructors enforce the invariant; fields are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    mode: WindowMode,
    last_millis: i64,
    from: i64,
    to: i64,
}

impl TimeWindow {
    /// Computes a rolling window of `last_millis` ending near `now`.
    ///
    /// The range carries a 10% lookahead past `now` to accommodate clock skew
    /// and in-flight data, and both bounds are aligned to the rollup interval
    /// chosen for the span. When alignment widens the span across a rollup
    /// threshold, the bounds are realigned to the coarser interval starting
    /// from the raw bounds so rounding error does not compound.
    pub fn rolling<C>(last_millis: i64, now: i64, chooser: &C) -> SyncResult<Self>
    where
        C: IntervalChooser + ?Sized,
    {
        if last_millis <= 0 {
            return Err(SyncError::InvalidData(
                "rolling window duration must be > 0".to_owned(),
            ));
        }

        let lookahead = last_millis / 10;
        let interval = checked_interval(chooser.choose(0, last_millis + lookahead))?;

        let from = now - last_millis;
        let to = now + lookahead;
        let mut revised_from = floor_to(from, interval);
        let mut revised_to = ceil_to(to, interval);

        let revised_interval = checked_interval(chooser.choose(revised_from, revised_to))?;
        if revised_interval != interval {
            // Expanded out to a larger rollup threshold; realign the raw
            // bounds rather than the already-aligned pair.
            revised_from = floor_to(from, revised_interval);
            revised_to = ceil_to(to, revised_interval);
        }

        Ok(Self {
            mode: WindowMode::Rolling,
            last_millis,
            from: revised_from,
            to: revised_to,
        })
    }

    /// Creates a fixed window with explicit bounds.
    pub fn absolute(from: i64, to: i64) -> SyncResult<Self> {
        if from >= to {
            return Err(SyncError::InvalidRange { from, to });
        }
        Ok(Self {
            mode: WindowMode::Absolute,
            last_millis: 0,
            from,
            to,
        })
    }

    /// Resolves a window from raw query fields.
    ///
    /// Precedence: a complete absolute range wins over a rolling duration,
    /// which wins over the default duration. Partial or malformed absolute
    /// input (one bound missing, or `from >= to`) silently falls through to
    /// the rolling branch.
    pub fn resolve<C>(
        probe: WindowProbe,
        default_last_millis: i64,
        now: i64,
        chooser: &C,
    ) -> SyncResult<Self>
    where
        C: IntervalChooser + ?Sized,
    {
        if probe.from != 0 && probe.to != 0 && probe.from < probe.to {
            return Self::absolute(probe.from, probe.to);
        }
        if probe.last > 0 {
            return Self::rolling(probe.last, now, chooser);
        }
        Self::rolling(default_last_millis, now, chooser)
    }

    #[must_use]
    pub fn mode(self) -> WindowMode {
        self.mode
    }

    #[must_use]
    pub fn is_rolling(self) -> bool {
        self.mode == WindowMode::Rolling
    }

    #[must_use]
    pub fn last_millis(self) -> i64 {
        self.last_millis
    }

    #[must_use]
    pub fn from(self) -> i64 {
        self.from
    }

    #[must_use]
    pub fn to(self) -> i64 {
        self.to
    }

    #[must_use]
    pub fn bounds(self) -> (i64, i64) {
        (self.from, self.to)
    }

    /// Re-derives the rollup interval for the final aligned range.
    ///
    /// This is the interval a data fetch for this window would aggregate at.
    #[must_use]
    pub fn effective_interval<C>(self, chooser: &C) -> i64
    where
        C: IntervalChooser + ?Sized,
    {
        chooser.choose(self.from, self.to)
    }
}

fn checked_interval(interval: i64) -> SyncResult<i64> {
    if interval <= 0 {
        return Err(SyncError::InvalidData(
            "rollup interval must be > 0".to_owned(),
        ));
    }
    Ok(interval)
}

fn floor_to(value: i64, step: i64) -> i64 {
    value.div_euclid(step) * step
}

fn ceil_to(value: i64, step: i64) -> i64 {
    let floored = floor_to(value, step);
    if floored == value {
        value
    } else {
        floored + step
    }
}
