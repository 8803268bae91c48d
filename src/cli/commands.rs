use tokio::sync::RwLock;

use crate::analytics::format_account_age;
use crate::config::Settings;
use crate::github::{GitHubClient, GitHubConfig};
use crate::history::{JsonFileStore, RecentSearches};
use crate::lookup::lookup_user;
use crate::Result;

/// Look up a profile directly against the upstream API and print it.
/// Shares the search history file with the server, so CLI lookups show up in
/// the web UI's recent searches.
pub async fn lookup(settings: &Settings, username: &str) -> Result<()> {
    let github = GitHubClient::new(GitHubConfig::from_env())?;
    let store = JsonFileStore::new(settings.history.path.clone());
    let history = RwLock::new(RecentSearches::load(
        Box::new(store),
        settings.history.limit,
    ));

    let result = lookup_user(&github, &history, username).await?;
    let user = &result.user;
    let analytics = &result.analytics;

    println!("{} (@{})", user.name.as_deref().unwrap_or(&user.login), user.login);
    if let Some(bio) = &user.bio {
        println!("  {bio}");
    }
    println!("  {}", user.html_url);
    println!();
    println!(
        "  Followers: {}   Following: {}   Public repos: {}",
        user.followers, user.following, user.public_repos
    );
    println!(
        "  Account age: {} ({} days)",
        format_account_age(analytics.account_age_days),
        analytics.account_age_days
    );

    if !result.repositories_fetched {
        println!();
        println!("  (repository fetch failed; analytics unavailable)");
        return Ok(());
    }

    println!(
        "  Total stars: {}   Average per repo: {:.1}",
        analytics.total_stars,
        analytics.average_stars()
    );

    let breakdown = analytics.language_breakdown();
    if !breakdown.is_empty() {
        println!();
        println!("  Languages:");
        for share in breakdown {
            println!(
                "    {:<16} {:>3} repo{} ({:.0}%)",
                share.language,
                share.count,
                if share.count == 1 { "" } else { "s" },
                share.percent
            );
        }
    }

    if !analytics.top_repos.is_empty() {
        println!();
        println!("  Top repositories:");
        for (index, repo) in analytics.top_repos.iter().enumerate() {
            println!(
                "    {}. {:<24} {:>6} stars  {}",
                index + 1,
                repo.name,
                repo.stargazers_count,
                repo.language.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}
