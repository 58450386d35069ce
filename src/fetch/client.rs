use super::{ApiCommit, ApiEvent, ApiRepo, ApiUser, GitHubApi};
use crate::error::{GpasError, Result};
use crate::types::config::GithubSettings;
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// Blocking GitHub REST client. Every sampling cap fits in a single page,
/// so each call is one request.
pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    pub fn from_settings(settings: &GithubSettings) -> Result<Self> {
        let token = std::env::var(&settings.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty());
        if token.is_none() {
            tracing::info!(
                env = %settings.token_env,
                "no token configured; using unauthenticated requests"
            );
        }
        Self::new(settings, token.as_deref())
    }

    pub fn new(settings: &GithubSettings, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim())).map_err(
                |_| GpasError::InvalidConfig("token contains invalid characters".to_string()),
            )?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).query(query).send()?;

        let status = response.status();
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(classify_failure(status, remaining.as_deref(), &body));
        }

        Ok(response.json()?)
    }
}

/// Maps a non-success response onto the error taxonomy.
pub fn classify_failure(status: StatusCode, rate_remaining: Option<&str>, body: &str) -> GpasError {
    match status {
        StatusCode::UNAUTHORIZED => GpasError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => GpasError::RateLimited,
        StatusCode::FORBIDDEN if rate_remaining.map(str::trim) == Some("0") => {
            GpasError::RateLimited
        }
        _ => GpasError::Api {
            status: status.as_u16(),
            message: api_message(body),
        },
    }
}

fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

impl GitHubApi for GitHubClient {
    fn user(&self, login: &str) -> Result<ApiUser> {
        match self.get_json(&format!("users/{login}"), &[]) {
            Err(GpasError::Api { status: 404, .. }) => {
                Err(GpasError::UserNotFound(login.to_string()))
            }
            other => other,
        }
    }

    fn repos(&self, login: &str, limit: u32) -> Result<Vec<ApiRepo>> {
        self.get_json(
            &format!("users/{login}/repos"),
            &[
                ("sort", "updated".to_string()),
                ("per_page", limit.to_string()),
            ],
        )
    }

    fn languages(&self, full_name: &str) -> Result<BTreeMap<String, u64>> {
        self.get_json(&format!("repos/{full_name}/languages"), &[])
    }

    fn commits(&self, full_name: &str, branch: &str, limit: u32) -> Result<Vec<ApiCommit>> {
        self.get_json(
            &format!("repos/{full_name}/commits"),
            &[("sha", branch.to_string()), ("per_page", limit.to_string())],
        )
    }

    fn public_events(&self, login: &str, limit: u32) -> Result<Vec<ApiEvent>> {
        self.get_json(
            &format!("users/{login}/events/public"),
            &[("per_page", limit.to_string())],
        )
    }
}
