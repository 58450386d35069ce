pub mod languages;
pub mod messages;
pub mod ratio;
pub mod stars;
pub mod timing;

use crate::types::bundle::ActivityBundle;
use crate::types::features::FeatureSet;
use chrono::{DateTime, Utc};
use ratio::{guarded_ratio, round_to};
use timing::CommitTiming;

const RATIO_PLACES: i32 = 4;
const Z_SCORE_PLACES: i32 = 3;

pub fn compute_features(bundle: &ActivityBundle) -> FeatureSet {
    compute_features_at(bundle, Utc::now())
}

/// Derives every signal from `bundle`. `now` is only used for repo age.
pub fn compute_features_at(bundle: &ActivityBundle, now: DateTime<Utc>) -> FeatureSet {
    let repo_count = bundle.repos.len() as u64;
    let fork_count = bundle.repos.iter().filter(|repo| repo.is_fork).count() as u64;
    let original_repos = repo_count.max(1) - fork_count;

    let timing = CommitTiming::from_commits(&bundle.commit_samples);
    let collab_events = bundle.collaboration_event_count;

    let features = FeatureSet {
        followers: bundle.profile.followers,
        following: bundle.profile.following,
        forks_ratio: round_to(guarded_ratio(fork_count, repo_count), RATIO_PLACES),
        original_repos,
        msg_uniqueness: round_to(
            messages::message_uniqueness(&bundle.commit_samples),
            RATIO_PLACES,
        ),
        commit_burst_index: round_to(timing.burst_index(), RATIO_PLACES),
        heatmap_entropy: round_to(timing.hour_entropy(), RATIO_PLACES),
        stars_spike_z: round_to(stars::stars_spike_z(&bundle.repos, now), Z_SCORE_PLACES),
        lang_diversity: round_to(
            languages::language_diversity(&bundle.language_byte_totals),
            RATIO_PLACES,
        ),
        collab_ratio: round_to(
            guarded_ratio(collab_events, collab_events.saturating_add(timing.dated_commits)),
            RATIO_PLACES,
        ),
        commit_count_sampled: timing.dated_commits,
        repo_count_sampled: repo_count,
        unique_languages: languages::unique_languages(&bundle.language_byte_totals),
    };

    tracing::debug!(
        login = %bundle.profile.login,
        repos = features.repo_count_sampled,
        commits = features.commit_count_sampled,
        "computed features"
    );
    features
}
