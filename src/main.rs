use clap::Parser;
use octoscope::{
    api::{handlers::AppState, routes},
    cli::{commands, Cli, Commands},
    config::Settings,
    github::{GitHubClient, GitHubConfig},
    history::{JsonFileStore, RecentSearches},
    Error, Result,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,octoscope=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Lookup { username } => {
            commands::lookup(&settings, &username).await?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting octoscope server");
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // Initialize the upstream client
    let github_config = GitHubConfig::from_env();
    if github_config.token.is_some() {
        info!("GitHub token configured");
    } else {
        info!("No GitHub token configured; unauthenticated rate limits apply");
    }
    let github = GitHubClient::new(github_config)?;

    // Load persisted search history
    let store = JsonFileStore::new(settings.history.path.clone());
    let history = RecentSearches::load(Box::new(store), settings.history.limit);
    info!(
        "Search history loaded: {} entries from {:?}",
        history.entries().len(),
        settings.history.path
    );

    // Create application state
    let state = AppState {
        github,
        history: Arc::new(RwLock::new(history)),
        settings: settings.clone(),
    };

    // Create router with rate limiting
    let app = routes::create_router(state, &settings);

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("octoscope");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("\nAPI Endpoints:");
    println!("  GET  /api/github/user/:username");
    println!("  GET  /api/github/repos/:username");
    println!("  GET  /api/profile/:username");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
