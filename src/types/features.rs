use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read access to named signals. The scorer only sees features through this,
/// so both a freshly extracted `FeatureSet` and a partial document loaded
/// from disk can be scored.
pub trait FeatureLookup {
    fn feature(&self, key: &str) -> Option<f64>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub followers: u64,
    pub following: u64,
    pub forks_ratio: f64,
    pub original_repos: u64,
    pub msg_uniqueness: f64,
    pub commit_burst_index: f64,
    pub heatmap_entropy: f64,
    pub stars_spike_z: f64,
    pub lang_diversity: f64,
    pub collab_ratio: f64,
    pub commit_count_sampled: u64,
    pub repo_count_sampled: u64,
    pub unique_languages: u64,
}

impl FeatureLookup for FeatureSet {
    fn feature(&self, key: &str) -> Option<f64> {
        let value = match key {
            "followers" => self.followers as f64,
            "following" => self.following as f64,
            "forks_ratio" => self.forks_ratio,
            "original_repos" => self.original_repos as f64,
            "msg_uniqueness" => self.msg_uniqueness,
            "commit_burst_index" => self.commit_burst_index,
            "heatmap_entropy" => self.heatmap_entropy,
            "stars_spike_z" => self.stars_spike_z,
            "lang_diversity" => self.lang_diversity,
            "collab_ratio" => self.collab_ratio,
            "commit_count_sampled" => self.commit_count_sampled as f64,
            "repo_count_sampled" => self.repo_count_sampled as f64,
            "unique_languages" => self.unique_languages as f64,
            _ => return None,
        };
        Some(value)
    }
}

impl FeatureLookup for BTreeMap<String, f64> {
    fn feature(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 13] = [
        "followers",
        "following",
        "forks_ratio",
        "original_repos",
        "msg_uniqueness",
        "commit_burst_index",
        "heatmap_entropy",
        "stars_spike_z",
        "lang_diversity",
        "collab_ratio",
        "commit_count_sampled",
        "repo_count_sampled",
        "unique_languages",
    ];

    #[test]
    fn every_declared_key_resolves_on_feature_set() {
        let features = FeatureSet::default();
        for key in KEYS {
            assert!(features.feature(key).is_some(), "{key} should resolve");
        }
        assert_eq!(features.feature("unknown"), None);
    }

    #[test]
    fn serialized_keys_follow_declared_order() {
        let value = serde_json::to_value(FeatureSet::default()).expect("features should serialize");
        let keys: Vec<&str> = value
            .as_object()
            .expect("features serialize as an object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, KEYS);
    }

    #[test]
    fn map_lookup_reports_missing_keys() {
        let mut map = BTreeMap::new();
        map.insert("forks_ratio".to_string(), 0.5);
        assert_eq!(map.feature("forks_ratio"), Some(0.5));
        assert_eq!(map.feature("msg_uniqueness"), None);
    }
}
