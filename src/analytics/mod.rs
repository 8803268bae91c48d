//! Aggregate statistics over a user's repository list.
//!
//! Everything here is a pure reduction: the summary is recomputed from the
//! freshly fetched repository list on every lookup and never outlives the
//! request that produced it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::github::Repository;

/// How many repositories the "top repositories" ranking keeps.
pub const TOP_REPOS: usize = 5;

/// How many languages the distribution chart shows.
pub const TOP_LANGUAGES: usize = 7;

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub total_stars: u64,
    pub top_languages: HashMap<String, usize>,
    pub top_repos: Vec<Repository>,
    pub account_age_days: i64,
    pub total_repos: usize,
}

/// One language's share of the distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub language: String,
    pub count: usize,
    pub percent: f64,
}

impl AnalyticsSummary {
    /// Reduce a repository list into summary statistics.
    ///
    /// `now` is passed in rather than read from the clock so the reduction
    /// stays deterministic under test. An empty list degrades to zeros and
    /// empty collections.
    pub fn compute(repos: &[Repository], created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total_stars = repos.iter().map(|r| r.stargazers_count).sum();

        let mut top_languages: HashMap<String, usize> = HashMap::new();
        for repo in repos {
            if let Some(language) = &repo.language {
                *top_languages.entry(language.clone()).or_insert(0) += 1;
            }
        }

        // Rank on a clone: the caller's list keeps its upstream order and the
        // full length is counted before truncation. Vec::sort_by is stable,
        // so star ties keep their original relative order.
        let mut top_repos = repos.to_vec();
        top_repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
        top_repos.truncate(TOP_REPOS);

        let account_age_days = (now - created_at).num_days().max(0);

        Self {
            total_stars,
            top_languages,
            top_repos,
            account_age_days,
            total_repos: repos.len(),
        }
    }

    /// Languages sorted by occurrence count descending (name ascending on
    /// ties), truncated to the chart's capacity, with each share's percentage
    /// of the shown total so the pie closes at 100%.
    pub fn language_breakdown(&self) -> Vec<LanguageShare> {
        let mut ranked: Vec<(&String, &usize)> = self.top_languages.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(TOP_LANGUAGES);

        let shown_total: usize = ranked.iter().map(|(_, count)| **count).sum();
        if shown_total == 0 {
            return Vec::new();
        }

        ranked
            .into_iter()
            .map(|(language, count)| LanguageShare {
                language: language.clone(),
                count: *count,
                percent: *count as f64 * 100.0 / shown_total as f64,
            })
            .collect()
    }

    /// Average stars per repository, one meaningful decimal; 0 for an empty
    /// list.
    pub fn average_stars(&self) -> f64 {
        if self.total_repos == 0 {
            return 0.0;
        }
        self.total_stars as f64 / self.total_repos as f64
    }
}

/// Render an account age in whole days as "N years M months".
pub fn format_account_age(days: i64) -> String {
    let years = days / 365;
    let months = (days % 365) / 30;

    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("{n} {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    if years > 0 {
        if months > 0 {
            format!("{} {}", plural(years, "year"), plural(months, "month"))
        } else {
            plural(years, "year")
        }
    } else {
        plural(months, "month")
    }
}
