use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// Chooses the data-aggregation bucket width for a time range.
///
/// Implementations must be monotonic non-decreasing in range width; the
/// window normalizer relies on that when it re-derives the interval after
/// boundary alignment.
pub trait IntervalChooser {
    fn choose(&self, from: i64, to: i64) -> i64;
}

impl<F> IntervalChooser for F
where
    F: Fn(i64, i64) -> i64,
{
    fn choose(&self, from: i64, to: i64) -> i64 {
        self(from, to)
    }
}

/// One rung of a rollup ladder: ranges up to `view_threshold_millis` wide
/// aggregate into `interval_millis` buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupTier {
    pub view_threshold_millis: i64,
    pub interval_millis: i64,
}

impl RollupTier {
    #[must_use]
    pub fn new(view_threshold_millis: i64, interval_millis: i64) -> Self {
        Self {
            view_threshold_millis,
            interval_millis,
        }
    }
}

/// Threshold-ladder interval chooser.
///
/// The first tier whose view threshold covers the range width wins; ranges
/// wider than every threshold fall back to the last tier's interval.
///
/// This type is serializable so host applications can persist their rollup
/// ladder alongside the rest of the dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdIntervalChooser {
    tiers: Vec<RollupTier>,
}

impl ThresholdIntervalChooser {
    pub fn new(tiers: Vec<RollupTier>) -> SyncResult<Self> {
        validate_tiers(&tiers)?;
        Ok(Self { tiers })
    }

    #[must_use]
    pub fn tiers(&self) -> &[RollupTier] {
        &self.tiers
    }
}

impl Default for ThresholdIntervalChooser {
    fn default() -> Self {
        Self {
            tiers: vec![
                RollupTier::new(2 * 60 * 60 * 1000, 60 * 1000),
                RollupTier::new(12 * 60 * 60 * 1000, 5 * 60 * 1000),
                RollupTier::new(3 * 24 * 60 * 60 * 1000, 30 * 60 * 1000),
                RollupTier::new(i64::MAX, 4 * 60 * 60 * 1000),
            ],
        }
    }
}

impl IntervalChooser for ThresholdIntervalChooser {
    fn choose(&self, from: i64, to: i64) -> i64 {
        let span = to.saturating_sub(from);
        self.tiers
            .iter()
            .find(|tier| span <= tier.view_threshold_millis)
            .or_else(|| self.tiers.last())
            .map_or(0, |tier| tier.interval_millis)
    }
}

fn validate_tiers(tiers: &[RollupTier]) -> SyncResult<()> {
    if tiers.is_empty() {
        return Err(SyncError::InvalidData(
            "rollup ladder must contain at least one tier".to_owned(),
        ));
    }

    for pair in tiers.windows(2) {
        if pair[1].view_threshold_millis <= pair[0].view_threshold_millis {
            return Err(SyncError::InvalidData(
                "rollup view thresholds must be strictly ascending".to_owned(),
            ));
        }
        if pair[1].interval_millis < pair[0].interval_millis {
            return Err(SyncError::InvalidData(
                "rollup intervals must be non-decreasing".to_owned(),
            ));
        }
    }

    for tier in tiers {
        if tier.view_threshold_millis <= 0 || tier.interval_millis <= 0 {
            return Err(SyncError::InvalidData(
                "rollup thresholds and intervals must be > 0".to_owned(),
            ));
        }
    }

    Ok(())
}
