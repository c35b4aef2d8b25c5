// GitHub REST client (blocking)

use super::pure::REPO_DESCRIPTION;
use super::types::{CreateOutcome, RemoteRepo, RepoHost};
use crate::error::SyncError;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("s1sync/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ApiRepo {
    full_name: String,
    clone_url: String,
    html_url: String,
    #[serde(default)]
    default_branch: Option<String>,
}

impl From<ApiRepo> for RemoteRepo {
    fn from(repo: ApiRepo) -> Self {
        RemoteRepo {
            full_name: repo.full_name,
            clone_url: repo.clone_url,
            html_url: repo.html_url,
            default_branch: repo.default_branch.unwrap_or_else(|| "main".to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

impl ApiError {
    fn describe(&self) -> String {
        let details: Vec<String> = self
            .errors
            .iter()
            .filter_map(|e| e.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .collect();
        if details.is_empty() {
            self.message.clone()
        } else {
            format!("{} ({})", self.message, details.join("; "))
        }
    }
}

pub struct GithubClient {
    client: Client,
    token: String,
}

impl GithubClient {
    pub fn new(token: &str) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| SyncError::RemoteApi(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            token: token.trim().to_string(),
        })
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(&self.token)
    }

    fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, SyncError> {
        self.authed(request)
            .send()
            .map_err(|e| SyncError::RemoteApi(format!("{} failed: {}", what, e.without_url())))
    }

    fn parse_repo(response: Response, what: &str) -> Result<RemoteRepo, SyncError> {
        response
            .json::<ApiRepo>()
            .map(RemoteRepo::from)
            .map_err(|e| SyncError::RemoteApi(format!("{}: unexpected response: {}", what, e.without_url())))
    }

    fn api_error(response: Response, what: &str) -> SyncError {
        let status = response.status();
        let body = response.json::<ApiError>().unwrap_or_default();
        SyncError::RemoteApi(format!("{} failed ({}): {}", what, status, body.describe()))
    }
}

impl RepoHost for GithubClient {
    fn find_repo(&self, full_name: &str) -> Result<Option<RemoteRepo>, SyncError> {
        let url = format!("{}/repos/{}", API_BASE, full_name.trim());
        let response = self.send(self.client.get(&url), "Repository lookup")?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!(repository = full_name, "repository not found");
                Ok(None)
            }
            s if s.is_success() => Self::parse_repo(response, "Repository lookup").map(Some),
            _ => Err(Self::api_error(response, "Repository lookup")),
        }
    }

    fn create_repo(&self, name: &str) -> Result<CreateOutcome, SyncError> {
        let url = format!("{}/user/repos", API_BASE);
        let body = serde_json::json!({
            "name": name,
            "description": REPO_DESCRIPTION,
            "private": true,
        });
        let response = self.send(self.client.post(&url).json(&body), "Repository creation")?;

        let status = response.status();
        if status.is_success() {
            return Self::parse_repo(response, "Repository creation").map(CreateOutcome::Created);
        }

        let error = response.json::<ApiError>().unwrap_or_default();
        if status == StatusCode::UNPROCESSABLE_ENTITY
            && error.describe().to_lowercase().contains("name already exists")
        {
            tracing::debug!(name, "repository name taken");
            return Ok(CreateOutcome::NameTaken);
        }

        Err(SyncError::RemoteApi(format!(
            "Repository creation failed ({}): {}",
            status,
            error.describe()
        )))
    }
}
