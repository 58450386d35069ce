use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Bounded snapshot of a user's public activity, as handed to feature extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityBundle {
    pub profile: Profile,
    /// Most recently updated first.
    pub repos: Vec<RepoInfo>,
    pub commit_samples: Vec<CommitSample>,
    pub language_byte_totals: BTreeMap<String, u64>,
    pub collaboration_event_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoInfo {
    pub name: String,
    pub is_fork: bool,
    pub star_count: u64,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitSample {
    /// Keeps the offset it was recorded with; hour-of-day is read in that zone.
    #[serde(deserialize_with = "lenient_local_timestamp")]
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub message: String,
}

impl CommitSample {
    pub fn new(timestamp: Option<DateTime<FixedOffset>>, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }
}

/// Reads an RFC 3339 timestamp, keeping its recorded offset. Anything
/// unparseable (wrong type, bad format, null) becomes `None` instead of
/// failing the whole document.
pub(crate) fn lenient_local_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok()))
}

/// Same as [`lenient_local_timestamp`], normalised to UTC.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_local_timestamp(deserializer)?.map(|parsed| parsed.with_timezone(&Utc)))
}
