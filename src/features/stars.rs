use crate::types::bundle::RepoInfo;
use chrono::{DateTime, Utc};

/// Stars per day since creation. Age is whole days, floored, minimum one.
pub fn star_rate(repo: &RepoInfo, now: DateTime<Utc>) -> Option<f64> {
    let created_at = repo.created_at?;
    let age_days = (now - created_at).num_days().max(1);
    Some(repo.star_count as f64 / age_days as f64)
}

/// Largest population z-score of per-repo star rate. Zero when there are
/// no rated repos or when every rate is equal.
pub fn stars_spike_z(repos: &[RepoInfo], now: DateTime<Utc>) -> f64 {
    let rates: Vec<f64> = repos
        .iter()
        .filter_map(|repo| star_rate(repo, now))
        .collect();
    if rates.is_empty() {
        return 0.0;
    }

    let count = rates.len() as f64;
    let mean = rates.iter().sum::<f64>() / count;
    let variance = rates.iter().map(|rate| (rate - mean).powi(2)).sum::<f64>() / count;
    let stddev = variance.sqrt();
    if stddev <= 0.0 {
        return 0.0;
    }

    rates
        .iter()
        .map(|rate| (rate - mean) / stddev)
        .fold(f64::NEG_INFINITY, f64::max)
}
