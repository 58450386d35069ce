use super::ratio::guarded_ratio;
use crate::types::bundle::CommitSample;
use std::collections::HashSet;

/// Lowercase, collapse whitespace runs, drop punctuation, trim.
pub fn normalize_message(message: &str) -> String {
    let lowered = message.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped: String = collapsed
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    stripped.trim().to_string()
}

/// Share of distinct normalised messages. Messages that normalise to an
/// empty string count toward neither side.
pub fn message_uniqueness(commits: &[CommitSample]) -> f64 {
    let normalized: Vec<String> = commits
        .iter()
        .map(|commit| normalize_message(&commit.message))
        .filter(|message| !message.is_empty())
        .collect();
    let unique: HashSet<&str> = normalized.iter().map(String::as_str).collect();
    guarded_ratio(unique.len() as u64, normalized.len() as u64)
}
