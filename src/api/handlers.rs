use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    api::models::*, config::Settings, github::GitHubClient, history::RecentSearches,
    lookup::lookup_user, Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub github: GitHubClient,
    pub history: Arc<RwLock<RecentSearches>>,
    pub settings: Settings,
}

/// Replace an upstream error's message while forwarding its status code.
/// Transport and other failures pass through untouched (the error layer maps
/// them to 500).
fn with_upstream_message(error: Error, message: &str) -> Error {
    match error {
        Error::Upstream { status, .. } => Error::Upstream {
            status,
            message: message.to_string(),
        },
        other => other,
    }
}

/// GET /api/github/user/:username - Forward a user profile from the upstream
/// API, body verbatim
pub async fn proxy_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>> {
    debug!("Proxy user request: {}", username);

    let body = state
        .github
        .get_user_raw(&username)
        .await
        .map_err(|e| with_upstream_message(e, "User not found"))?;

    Ok(Json(body))
}

/// GET /api/github/repos/:username - Forward a repository listing from the
/// upstream API, body verbatim (at most 100 entries, most recently updated
/// first)
pub async fn proxy_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>> {
    debug!("Proxy repos request: {}", username);

    let body = state
        .github
        .get_repositories_raw(&username)
        .await
        .map_err(|e| with_upstream_message(e, "Failed to fetch repositories"))?;

    Ok(Json(body))
}

/// GET /api/profile/:username - Full lookup: profile, analytics, recorded
/// search
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ProfileResponse>> {
    debug!("Profile lookup request: {}", username);

    let lookup = lookup_user(&state.github, &state.history, &username).await?;

    Ok(Json(ProfileResponse {
        user: lookup.user,
        analytics: lookup.analytics,
        repositories_fetched: lookup.repositories_fetched,
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    // The only local dependency is the history store; prove it is writable
    let history_ok = state.history.read().await.persist().is_ok();

    Ok(Json(ReadinessResponse {
        ready: history_ok,
        history_store: if history_ok { "ok" } else { "error" }.to_string(),
    }))
}
