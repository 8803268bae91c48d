pub mod config;
pub mod error;

// Upstream API client
pub mod github;

// Aggregation core
pub mod analytics;

// Recent-search history
pub mod history;

// Lookup orchestration
pub mod lookup;

// HTTP surface
pub mod api;
pub mod web;

// CLI
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
