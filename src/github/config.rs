use std::env;

/// GitHub API client configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Optional GitHub personal access token for increased rate limits
    pub token: Option<String>,

    /// Base URL of the GitHub REST API (overridable for tests)
    pub api_base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Upstream page size for repository listings (GitHub caps this at 100)
    pub per_page: u32,
}

impl GitHubConfig {
    /// Create a new GitHubConfig from environment variables
    pub fn from_env() -> Self {
        Self {
            token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            api_base_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            timeout_secs: env::var("GITHUB_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            per_page: env::var("GITHUB_PER_PAGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100)
                .min(100),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: "https://api.github.com".to_string(),
            timeout_secs: 30,
            per_page: 100,
        }
    }
}
