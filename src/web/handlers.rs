use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Deserializer};

use crate::{
    analytics::format_account_age,
    api::handlers::AppState,
    error::Error,
    lookup::lookup_user,
    utils::validation::{normalize_website, validate_username},
    web::charts::{self, Bar, PieSlice},
    Result,
};

/// Deserialize optional string, treating empty strings as None
fn deserialize_optional_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Ok(Some(s.to_string())),
    }
}

/// Index page template
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    query: String,
    error: Option<String>,
    recent_searches: Vec<String>,
}

/// Profile page template
#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate {
    query: String,
    recent_searches: Vec<String>,
    user: UserCardData,
    stats: StatTileData,
    pie: Vec<PieSlice>,
    bars: Vec<Bar>,
    top_repos: Vec<RepoCardData>,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct UserCardData {
    login: String,
    display_name: String,
    avatar_url: String,
    bio: String,
    location: String,
    company: String,
    website_url: String,
    website_label: String,
    followers: u64,
    following: u64,
    public_repos: u64,
    html_url: String,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct StatTileData {
    total_stars: u64,
    language_count: usize,
    total_repos: usize,
    years_on_github: i64,
    account_age: String,
    average_stars: String,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct RepoCardData {
    rank: usize,
    name: String,
    language: String,
    description: String,
    stars: u64,
    forks: u64,
    updated: String,
    html_url: String,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    username: Option<String>,
}

/// GET / - Search page
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let recent_searches = state.history.read().await.entries().to_vec();

    let template = IndexTemplate {
        query: String::new(),
        error: None,
        recent_searches,
    };

    render(template)
}

/// GET /search - Form target; sends valid usernames to their profile page.
/// Blank or malformed input goes straight back to the index without touching
/// the upstream API.
pub async fn search_redirect(Query(params): Query<SearchParams>) -> Redirect {
    let Some(input) = params.username else {
        return Redirect::to("/");
    };

    match validate_username(&input) {
        Ok(username) => Redirect::to(&format!("/u/{}", urlencoding::encode(username))),
        Err(_) => Redirect::to("/"),
    }
}

/// GET /u/:username - Profile page
pub async fn profile_page(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Response> {
    let lookup = match lookup_user(&state.github, &state.history, &username).await {
        Ok(lookup) => lookup,
        Err(e) => {
            // A failed lookup renders the search page with a single banner.
            // The user fetch failing is the only fatal channel, so only two
            // messages can surface here.
            let message = match &e {
                Error::NotFound(_) => "User not found.".to_string(),
                Error::Validation(msg) => msg.clone(),
                _ => "Failed to fetch user data.".to_string(),
            };
            tracing::warn!("Lookup failed for {:?}: {}", username, e.log_safe());

            let template = IndexTemplate {
                query: username,
                error: Some(message),
                recent_searches: state.history.read().await.entries().to_vec(),
            };
            return Ok(render(template)?.into_response());
        }
    };

    let user = &lookup.user;
    let (website_url, website_label) = match user.blog.as_deref().and_then(normalize_website) {
        Some(url) => (url, user.blog.clone().unwrap_or_default()),
        None => (String::new(), String::new()),
    };

    let user_card = UserCardData {
        login: user.login.clone(),
        display_name: user.name.clone().unwrap_or_else(|| user.login.clone()),
        avatar_url: user.avatar_url.clone(),
        bio: user.bio.clone().unwrap_or_default(),
        location: user.location.clone().unwrap_or_default(),
        company: user.company.clone().unwrap_or_default(),
        website_url,
        website_label,
        followers: user.followers,
        following: user.following,
        public_repos: user.public_repos,
        html_url: user.html_url.clone(),
    };

    let analytics = &lookup.analytics;
    let stats = StatTileData {
        total_stars: analytics.total_stars,
        language_count: analytics.top_languages.len(),
        total_repos: analytics.total_repos,
        years_on_github: analytics.account_age_days / 365,
        account_age: format_account_age(analytics.account_age_days),
        average_stars: format!("{:.1}", analytics.average_stars()),
    };

    let pie = charts::pie_chart(&analytics.language_breakdown());
    let bars = charts::star_bars(&analytics.top_repos);

    let top_repos = analytics
        .top_repos
        .iter()
        .enumerate()
        .map(|(index, repo)| RepoCardData {
            rank: index + 1,
            name: repo.name.clone(),
            language: repo.language.clone().unwrap_or_default(),
            description: repo.description.clone().unwrap_or_default(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            updated: repo.updated_at.format("%b %e, %Y").to_string(),
            html_url: repo.html_url.clone(),
        })
        .collect();

    let template = ProfileTemplate {
        query: user.login.clone(),
        recent_searches: state.history.read().await.entries().to_vec(),
        user: user_card,
        stats,
        pie,
        bars,
        top_repos,
    };

    Ok(render(template)?.into_response())
}

fn render<T: Template>(template: T) -> Result<Html<String>> {
    Ok(Html(template.render().map_err(|e| {
        Error::Internal(format!("Template render failed: {e}"))
    })?))
}
