use crate::github::{
    config::GitHubConfig,
    models::{Repository, UserProfile},
};
use crate::{Error, Result};
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, error};

/// GitHub API client.
///
/// One anonymous caller identity: requests carry the v3 `Accept` header and an
/// identifying `User-Agent`, plus a bearer token when one is configured.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("octoscope/0.1"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        // Add authentication if token is provided
        if let Some(token) = &config.token {
            let auth_value = format!("Bearer {token}");
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&auth_value)
                    .map_err(|e| Error::Internal(format!("Invalid GitHub token: {e}")))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Make a GET request to the GitHub API
    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.config.api_base_url, path);
        debug!("GitHub API request: GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if !status.is_success() {
            error!("GitHub API error: HTTP {} for {}", status, path);
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: format!("GitHub API error: {status}"),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Internal(format!("Failed to parse GitHub API response: {e}")))
    }

    fn user_path(&self, username: &str) -> String {
        format!("/users/{}", urlencoding::encode(username))
    }

    fn repos_path(&self, username: &str) -> String {
        format!(
            "/users/{}/repos?per_page={}&sort=updated&direction=desc",
            urlencoding::encode(username),
            self.config.per_page
        )
    }

    /// Get a user profile
    pub async fn get_user(&self, username: &str) -> Result<UserProfile> {
        self.get(&self.user_path(username)).await
    }

    /// Get a user's repositories, most recently updated first (at most one
    /// upstream page, 100 entries)
    pub async fn get_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        self.get(&self.repos_path(username)).await
    }

    /// Get a user profile as raw JSON, preserving every upstream field for
    /// verbatim proxying
    pub async fn get_user_raw(&self, username: &str) -> Result<Value> {
        self.get(&self.user_path(username)).await
    }

    /// Get a user's repositories as raw JSON for verbatim proxying
    pub async fn get_repositories_raw(&self, username: &str) -> Result<Value> {
        self.get(&self.repos_path(username)).await
    }
}
