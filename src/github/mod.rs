pub mod client;
pub mod config;
pub mod models;

pub use client::GitHubClient;
pub use config::GitHubConfig;
pub use models::{Repository, UserProfile};
