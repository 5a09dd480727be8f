//! Batch-relative normalization helpers

use crate::utils::clamp_unit;
use chrono::{DateTime, Utc};

/// Observed range of one factor across a batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    /// Range of the given values, or `None` when there are none
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().fold(None, |range, value| match range {
            None => Some(Self {
                min: value,
                max: value,
            }),
            Some(Self { min, max }) => Some(Self {
                min: min.min(value),
                max: max.max(value),
            }),
        })
    }

    /// `(value - min) / (max - min)`, or 0 when the range is empty
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() {
            return 0.0;
        }
        clamp_unit((value - self.min) / span)
    }
}

/// Normalize against an optional range; no range means no signal
pub fn normalize_in(range: Option<MinMax>, value: f64) -> f64 {
    range.map_or(0.0, |r| r.normalize(value))
}

/// Recency relative to the oldest release in a batch
#[derive(Debug, Clone, Copy)]
pub struct RecencyWindow {
    now: DateTime<Utc>,
    max_age_secs: f64,
}

impl RecencyWindow {
    pub fn from_releases<I>(now: DateTime<Utc>, releases: I) -> Self
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        let max_age_secs = releases
            .into_iter()
            .map(|released| age_secs(now, released))
            .fold(0.0, f64::max);

        Self { now, max_age_secs }
    }

    /// `1 - age / maxAge`; released-now scores 1, oldest in batch scores 0
    pub fn contribution(&self, released: Option<DateTime<Utc>>) -> f64 {
        let Some(released) = released else {
            return 0.0;
        };

        // every timestamped game released at `now`
        if self.max_age_secs <= 0.0 {
            return 1.0;
        }

        clamp_unit(1.0 - age_secs(self.now, released) / self.max_age_secs)
    }
}

/// Seconds since release at full timestamp precision; future releases count as age 0
fn age_secs(now: DateTime<Utc>, released: DateTime<Utc>) -> f64 {
    let age = now - released;
    let secs = match age.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        // spans beyond ~292 years overflow nanoseconds
        None => age.num_milliseconds() as f64 / 1e3,
    };
    secs.max(0.0)
}
