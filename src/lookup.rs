//! One profile lookup cycle: validate the username, fetch the profile, fetch
//! the repositories, reduce to analytics, record the search.
//!
//! The two fetches are sequential and their failures are independent
//! channels: a failed user fetch aborts the cycle, a failed repository fetch
//! is tolerated and leaves the profile with empty analytics.

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::analytics::AnalyticsSummary;
use crate::github::{GitHubClient, Repository, UserProfile};
use crate::history::RecentSearches;
use crate::utils::validation::validate_username;
use crate::{Error, Result};

/// Everything a single lookup produced. Owned by the request that ran it and
/// discarded afterwards.
pub struct Lookup {
    pub user: UserProfile,
    pub repositories: Vec<Repository>,
    pub analytics: AnalyticsSummary,
    /// False when the repository fetch failed and the analytics are the
    /// empty-list reduction.
    pub repositories_fetched: bool,
}

pub async fn lookup_user(
    github: &GitHubClient,
    history: &RwLock<RecentSearches>,
    input: &str,
) -> Result<Lookup> {
    // Invalid input never reaches the upstream API
    let username = validate_username(input)?;
    debug!("Looking up profile: {}", username);

    let user = github.get_user(username).await.map_err(|e| {
        if e.is_not_found() {
            Error::NotFound("User not found.".to_string())
        } else {
            e
        }
    })?;

    // The repository fetch starts only after the user fetch resolved
    let (repositories, repositories_fetched) = match github.get_repositories(username).await {
        Ok(repositories) => (repositories, true),
        Err(e) => {
            warn!(
                "Repository fetch failed for {}, rendering without analytics: {}",
                username,
                e.log_safe()
            );
            (Vec::new(), false)
        }
    };

    let analytics = AnalyticsSummary::compute(&repositories, user.created_at, Utc::now());

    // Recorded on every successful user fetch, regardless of the repository
    // outcome. A store failure must not fail the lookup.
    if let Err(e) = history.write().await.record(username) {
        warn!("Failed to persist search history: {}", e.log_safe());
    }

    Ok(Lookup {
        user,
        repositories,
        analytics,
        repositories_fetched,
    })
}
