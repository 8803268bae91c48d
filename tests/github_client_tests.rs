use mockito::Matcher;
use serde_json::json;

use octoscope::github::{GitHubClient, GitHubConfig};
use octoscope::Error;

fn client_for(server: &mockito::ServerGuard) -> GitHubClient {
    let config = GitHubConfig {
        api_base_url: server.url(),
        ..GitHubConfig::default()
    };
    GitHubClient::new(config).unwrap()
}

fn user_body() -> serde_json::Value {
    json!({
        "login": "octocat",
        "name": "The Octocat",
        "avatar_url": "https://avatars.githubusercontent.com/u/583231",
        "bio": "Mascot",
        "location": "San Francisco",
        "company": "@github",
        "blog": "github.blog",
        "followers": 9999,
        "following": 9,
        "public_repos": 8,
        "html_url": "https://github.com/octocat",
        "created_at": "2011-01-25T18:44:36Z"
    })
}

#[tokio::test]
async fn get_user_sends_github_headers_and_parses() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/octocat")
        .match_header("accept", "application/vnd.github.v3+json")
        .match_header("user-agent", "octoscope/0.1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_body().to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let user = client.get_user("octocat").await.unwrap();

    assert_eq!(user.login, "octocat");
    assert_eq!(user.followers, 9999);
    assert_eq!(user.created_at.to_rfc3339(), "2011-01-25T18:44:36+00:00");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_repositories_requests_one_page_sorted_by_update() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), "100".into()),
            Matcher::UrlEncoded("sort".into(), "updated".into()),
            Matcher::UrlEncoded("direction".into(), "desc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {
                    "name": "hello-world",
                    "description": "My first repository",
                    "stargazers_count": 42,
                    "forks_count": 9,
                    "language": "Rust",
                    "html_url": "https://github.com/octocat/hello-world",
                    "created_at": "2011-01-26T19:01:12Z",
                    "updated_at": "2024-06-01T00:00:00Z"
                }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let repos = client.get_repositories("octocat").await.unwrap();

    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].name, "hello-world");
    assert_eq!(repos[0].language.as_deref(), Some("Rust"));
    mock.assert_async().await;
}

#[tokio::test]
async fn upstream_status_is_preserved_in_the_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/ghost")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_user("ghost").await.unwrap_err();

    match err {
        Error::Upstream { status, .. } => assert_eq!(status, 404),
        other => panic!("expected Upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn forbidden_is_forwarded_not_translated() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"message": "rate limit exceeded"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_repositories("octocat").await.unwrap_err();

    match err {
        Error::Upstream { status, .. } => assert_eq!(status, 403),
        other => panic!("expected Upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    // Nothing listens on this port
    let config = GitHubConfig {
        api_base_url: "http://127.0.0.1:9".to_string(),
        ..GitHubConfig::default()
    };
    let client = GitHubClient::new(config).unwrap();

    let err = client.get_user("octocat").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn usernames_are_percent_encoded_in_paths() {
    let mut server = mockito::Server::new_async().await;
    // A username that would otherwise break out of its path segment
    let mock = server
        .mock("GET", "/users/weird%2Fname")
        .with_status(404)
        .create_async()
        .await;

    let client = client_for(&server);
    let _ = client.get_user("weird/name").await;

    mock.assert_async().await;
}
