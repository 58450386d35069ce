use super::ratio::guarded_ratio;
use std::collections::BTreeMap;

pub fn unique_languages(byte_totals: &BTreeMap<String, u64>) -> u64 {
    byte_totals.values().filter(|bytes| **bytes > 0).count() as u64
}

/// `unique / (unique + 1)`. Always below 1.0 and independent of byte
/// volume; see DESIGN.md before changing it.
pub fn language_diversity(byte_totals: &BTreeMap<String, u64>) -> f64 {
    let unique = unique_languages(byte_totals);
    guarded_ratio(unique, unique + 1)
}
