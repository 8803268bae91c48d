use serde::Serialize;

use crate::analytics::AnalyticsSummary;
use crate::github::UserProfile;

/// Combined lookup payload for JSON consumers
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
    pub analytics: AnalyticsSummary,
    /// False when the repository fetch failed and the analytics were computed
    /// over an empty list
    pub repositories_fetched: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub history_store: String,
}
