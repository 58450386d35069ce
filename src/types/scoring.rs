use super::features::FeatureLookup;
use serde::Serialize;

pub const BASE_SCORE: i64 = 100;

/// Declarative trigger for a penalty rule. A missing feature takes the
/// supplied default, which is always chosen so the comparison does not fire.
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    Above {
        key: &'static str,
        threshold: f64,
        default: f64,
    },
    Below {
        key: &'static str,
        threshold: f64,
        default: f64,
    },
    All(&'static [Condition]),
}

impl Condition {
    pub fn holds<F: FeatureLookup + ?Sized>(&self, features: &F) -> bool {
        match *self {
            Self::Above {
                key,
                threshold,
                default,
            } => features.feature(key).unwrap_or(default) > threshold,
            Self::Below {
                key,
                threshold,
                default,
            } => features.feature(key).unwrap_or(default) < threshold,
            Self::All(conditions) => conditions
                .iter()
                .all(|condition| condition.holds(features)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PenaltyRule {
    pub id: &'static str,
    pub condition: Condition,
    pub points: u32,
    pub reason: &'static str,
}

impl PenaltyRule {
    pub fn explanation(&self) -> String {
        format!("-{} {}", self.points, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: u8,
    pub explanations: Vec<String>,
}
