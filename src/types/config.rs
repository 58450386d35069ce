use crate::error::GpasError;
use serde::Deserialize;

pub const MAX_SAMPLED_REPOS: u32 = 20;
pub const MAX_COMMITS_PER_REPO: u32 = 50;
pub const MAX_INSPECTED_EVENTS: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GpasConfig {
    pub github: Option<GithubConfig>,
    pub sampling: Option<SamplingSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    pub api_url: Option<String>,
    pub token_env: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingSection {
    pub max_repos: Option<u32>,
    pub commits_per_repo: Option<u32>,
    pub max_events: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubSettings {
    pub api_url: String,
    pub token_env: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            user_agent: format!("gpas/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    pub max_repos: u32,
    pub commits_per_repo: u32,
    pub max_events: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_repos: MAX_SAMPLED_REPOS,
            commits_per_repo: MAX_COMMITS_PER_REPO,
            max_events: MAX_INSPECTED_EVENTS,
        }
    }
}

impl GpasConfig {
    pub fn github(&self) -> GithubSettings {
        let defaults = GithubSettings::default();
        match &self.github {
            Some(github) => GithubSettings {
                api_url: github
                    .api_url
                    .clone()
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.api_url),
                token_env: github.token_env.clone().unwrap_or(defaults.token_env),
                user_agent: github.user_agent.clone().unwrap_or(defaults.user_agent),
                timeout_secs: github.timeout_secs.unwrap_or(defaults.timeout_secs),
            },
            None => defaults,
        }
    }

    pub fn sampling(&self) -> SamplingConfig {
        let defaults = SamplingConfig::default();
        match &self.sampling {
            Some(sampling) => SamplingConfig {
                max_repos: sampling.max_repos.unwrap_or(defaults.max_repos),
                commits_per_repo: sampling
                    .commits_per_repo
                    .unwrap_or(defaults.commits_per_repo),
                max_events: sampling.max_events.unwrap_or(defaults.max_events),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), GpasError> {
        let github = self.github();
        if github.api_url.trim().is_empty() {
            return Err(GpasError::InvalidConfig(
                "github.api_url cannot be empty".to_string(),
            ));
        }
        if github.timeout_secs == 0 {
            return Err(GpasError::InvalidConfig(
                "github.timeout_secs must be greater than 0".to_string(),
            ));
        }

        let sampling = self.sampling();
        for (name, value, max) in [
            ("sampling.max_repos", sampling.max_repos, MAX_SAMPLED_REPOS),
            (
                "sampling.commits_per_repo",
                sampling.commits_per_repo,
                MAX_COMMITS_PER_REPO,
            ),
            ("sampling.max_events", sampling.max_events, MAX_INSPECTED_EVENTS),
        ] {
            if !(1..=max).contains(&value) {
                return Err(GpasError::InvalidConfig(format!(
                    "{name} must be between 1 and {max} (found {value})"
                )));
            }
        }

        Ok(())
    }
}
