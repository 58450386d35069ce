use crate::types::features::FeatureLookup;
use crate::types::scoring::{Condition, PenaltyRule, ScoreResult, BASE_SCORE};

/// Evaluated top to bottom; explanation order follows this table.
pub const PENALTY_RULES: [PenaltyRule; 7] = [
    PenaltyRule {
        id: "forks.dominant",
        condition: Condition::All(&[
            Condition::Above {
                key: "forks_ratio",
                threshold: 0.85,
                default: 0.0,
            },
            Condition::Below {
                key: "original_repos",
                threshold: 3.0,
                default: f64::INFINITY,
            },
        ]),
        points: 15,
        reason: "Mostly forks, very few original repos",
    },
    PenaltyRule {
        id: "commits.bursty",
        condition: Condition::Above {
            key: "commit_burst_index",
            threshold: 0.9,
            default: 0.0,
        },
        points: 10,
        reason: "Highly bursty commit pattern (many commits in one day)",
    },
    PenaltyRule {
        id: "commits.repetitive_messages",
        condition: Condition::Below {
            key: "msg_uniqueness",
            threshold: 0.4,
            default: 1.0,
        },
        points: 10,
        reason: "Low variety in commit messages",
    },
    PenaltyRule {
        id: "stars.spike",
        condition: Condition::Above {
            key: "stars_spike_z",
            threshold: 3.0,
            default: 0.0,
        },
        points: 10,
        reason: "Unnatural star spike vs repo age",
    },
    PenaltyRule {
        id: "timing.low_entropy",
        condition: Condition::Below {
            key: "heatmap_entropy",
            threshold: 0.2,
            default: 1.0,
        },
        points: 10,
        reason: "Contribution timing entropy is too low",
    },
    PenaltyRule {
        id: "collaboration.low",
        condition: Condition::Below {
            key: "collab_ratio",
            threshold: 0.05,
            default: 1.0,
        },
        points: 10,
        reason: "Very low collaboration activity (issues/PR/reviews)",
    },
    PenaltyRule {
        id: "languages.low_diversity",
        condition: Condition::Below {
            key: "lang_diversity",
            threshold: 0.2,
            default: 1.0,
        },
        points: 10,
        reason: "Very low language diversity",
    },
];

pub fn compute_score<F: FeatureLookup + ?Sized>(features: &F) -> ScoreResult {
    apply_rules(features, &PENALTY_RULES)
}

/// Starts at 100 and deducts every rule that fires, independently and
/// in slice order. The result is clamped to [0, 100].
pub fn apply_rules<F: FeatureLookup + ?Sized>(features: &F, rules: &[PenaltyRule]) -> ScoreResult {
    let mut score = BASE_SCORE;
    let mut explanations = Vec::new();

    for rule in rules {
        if rule.condition.holds(features) {
            tracing::debug!(rule = rule.id, points = rule.points, "penalty rule fired");
            score -= i64::from(rule.points);
            explanations.push(rule.explanation());
        }
    }

    ScoreResult {
        score: score.clamp(0, 100) as u8,
        explanations,
    }
}

pub fn explain_score(result: &ScoreResult) -> &[String] {
    &result.explanations
}
