use super::ratio::guarded_ratio;
use crate::types::bundle::CommitSample;
use chrono::{NaiveDate, Timelike, Utc};
use std::collections::HashMap;

const HOURS_PER_DAY: usize = 24;
const LOG_EPSILON: f64 = 1e-9;

/// Day and hour-of-day histograms over commits that carry a timestamp.
/// Days are UTC calendar days; hours are the local hour as recorded.
#[derive(Debug, Clone, Default)]
pub struct CommitTiming {
    pub per_day: HashMap<NaiveDate, u64>,
    pub per_hour: [u64; HOURS_PER_DAY],
    pub dated_commits: u64,
}

impl CommitTiming {
    pub fn from_commits(commits: &[CommitSample]) -> Self {
        let mut timing = Self::default();
        for timestamp in commits.iter().filter_map(|commit| commit.timestamp) {
            let day = timestamp.with_timezone(&Utc).date_naive();
            *timing.per_day.entry(day).or_insert(0) += 1;
            timing.per_hour[timestamp.hour() as usize] += 1;
            timing.dated_commits += 1;
        }
        timing
    }

    /// Share of commits on the single busiest UTC calendar day.
    pub fn burst_index(&self) -> f64 {
        match self.per_day.values().max() {
            Some(busiest) => guarded_ratio(*busiest, self.dated_commits),
            None => 0.0,
        }
    }

    pub fn hour_entropy(&self) -> f64 {
        normalized_entropy(&self.per_hour)
    }
}

/// Shannon entropy (base 2) of the bucket distribution divided by
/// log2(bucket count), clamped to [0, 1].
pub fn normalized_entropy(counts: &[u64]) -> f64 {
    if counts.len() < 2 {
        return 0.0;
    }
    let total: u64 = counts.iter().sum();
    let entropy: f64 = -counts
        .iter()
        .map(|count| guarded_ratio(*count, total))
        .filter(|probability| *probability > 0.0)
        .map(|probability| probability * (probability + LOG_EPSILON).log2())
        .sum::<f64>();
    (entropy / (counts.len() as f64).log2()).clamp(0.0, 1.0)
}
