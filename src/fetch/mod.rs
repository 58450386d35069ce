pub mod client;

use crate::error::Result;
use crate::types::bundle::{
    lenient_local_timestamp, lenient_timestamp, ActivityBundle, CommitSample, Profile, RepoInfo,
};
use crate::types::config::SamplingConfig;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const COLLABORATION_EVENT_TYPES: [&str; 4] = [
    "IssuesEvent",
    "PullRequestEvent",
    "PullRequestReviewCommentEvent",
    "IssueCommentEvent",
];

const FALLBACK_BRANCH: &str = "main";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiUser {
    pub login: String,
    pub name: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiRepo {
    pub name: String,
    pub full_name: String,
    pub fork: bool,
    pub stargazers_count: u64,
    pub default_branch: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiCommit {
    pub commit: ApiCommitDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiCommitDetail {
    pub author: Option<ApiCommitAuthor>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiCommitAuthor {
    #[serde(deserialize_with = "lenient_local_timestamp")]
    pub date: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiEvent {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Read-only slice of the GitHub REST API the fetch layer needs.
pub trait GitHubApi {
    fn user(&self, login: &str) -> Result<ApiUser>;
    /// Owned repos, most recently updated first.
    fn repos(&self, login: &str, limit: u32) -> Result<Vec<ApiRepo>>;
    fn languages(&self, full_name: &str) -> Result<BTreeMap<String, u64>>;
    fn commits(&self, full_name: &str, branch: &str, limit: u32) -> Result<Vec<ApiCommit>>;
    fn public_events(&self, login: &str, limit: u32) -> Result<Vec<ApiEvent>>;
}

impl From<ApiUser> for Profile {
    fn from(user: ApiUser) -> Self {
        Self {
            login: user.login,
            name: user.name,
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
            created_at: user.created_at,
        }
    }
}

impl From<&ApiRepo> for RepoInfo {
    fn from(repo: &ApiRepo) -> Self {
        Self {
            name: repo.name.clone(),
            is_fork: repo.fork,
            star_count: repo.stargazers_count,
            created_at: repo.created_at,
            pushed_at: repo.pushed_at,
        }
    }
}

impl From<ApiCommit> for CommitSample {
    fn from(commit: ApiCommit) -> Self {
        let detail = commit.commit;
        Self::new(
            detail.author.and_then(|author| author.date),
            detail.message.unwrap_or_default().trim(),
        )
    }
}

/// Assembles an activity bundle. Profile and repo listing failures abort;
/// a repo whose languages or commits cannot be read is left out of that
/// collection only, and an unreadable event feed counts as no collaboration.
pub fn fetch_profile_bundle<A: GitHubApi + ?Sized>(
    api: &A,
    login: &str,
    sampling: &SamplingConfig,
) -> Result<ActivityBundle> {
    let profile = Profile::from(api.user(login)?);
    tracing::info!(login = %profile.login, "fetched profile");

    let mut api_repos = api.repos(login, sampling.max_repos)?;
    api_repos.truncate(sampling.max_repos as usize);

    let mut repos = Vec::with_capacity(api_repos.len());
    let mut commit_samples = Vec::new();
    let mut language_byte_totals = BTreeMap::<String, u64>::new();

    for repo in &api_repos {
        repos.push(RepoInfo::from(repo));
        let full_name = repo_path(login, repo);

        match api.languages(&full_name) {
            Ok(languages) => {
                for (language, bytes) in languages {
                    *language_byte_totals.entry(language).or_insert(0) += bytes;
                }
            }
            Err(err) => tracing::warn!(repo = %full_name, error = %err, "skipping languages"),
        }

        let branch = repo.default_branch.as_deref().unwrap_or(FALLBACK_BRANCH);
        match api.commits(&full_name, branch, sampling.commits_per_repo) {
            Ok(commits) => commit_samples.extend(
                commits
                    .into_iter()
                    .take(sampling.commits_per_repo as usize)
                    .map(CommitSample::from),
            ),
            Err(err) => tracing::warn!(repo = %full_name, error = %err, "skipping commits"),
        }
    }
    tracing::info!(
        repos = repos.len(),
        commits = commit_samples.len(),
        "fetched repositories"
    );

    let collaboration_event_count = match api.public_events(login, sampling.max_events) {
        Ok(events) => count_collaboration_events(&events, sampling.max_events),
        Err(err) => {
            tracing::warn!(error = %err, "public events unavailable; counting no collaboration");
            0
        }
    };

    Ok(ActivityBundle {
        profile,
        repos,
        commit_samples,
        language_byte_totals,
        collaboration_event_count,
    })
}

pub fn count_collaboration_events(events: &[ApiEvent], limit: u32) -> u64 {
    events
        .iter()
        .take(limit as usize)
        .filter(|event| {
            event
                .kind
                .as_deref()
                .is_some_and(|kind| COLLABORATION_EVENT_TYPES.contains(&kind))
        })
        .count() as u64
}

fn repo_path(login: &str, repo: &ApiRepo) -> String {
    if repo.full_name.is_empty() {
        format!("{login}/{}", repo.name)
    } else {
        repo.full_name.clone()
    }
}
