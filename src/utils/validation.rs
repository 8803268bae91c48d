// Validation utilities
use crate::error::{Error, Result};
use tracing::warn;
use url::Url;

/// Longest username GitHub will issue.
const MAX_USERNAME_LEN: usize = 39;

/// Validate a GitHub username: non-blank, ASCII alphanumeric and single
/// internal hyphens, at most 39 characters. Returns the trimmed username.
pub fn validate_username(input: &str) -> Result<&str> {
    let username = input.trim();

    if username.is_empty() {
        return Err(Error::Validation("Username must not be blank".to_string()));
    }

    if username.len() > MAX_USERNAME_LEN {
        return Err(Error::Validation(format!(
            "Username exceeds {MAX_USERNAME_LEN} characters"
        )));
    }

    let valid_shape = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--");

    if !valid_shape {
        warn!("Rejected malformed username: {:?}", username);
        return Err(Error::Validation(format!(
            "Not a valid GitHub username: {username}"
        )));
    }

    Ok(username)
}

/// Normalize a profile's website field into a renderable link.
/// GitHub stores it as free text, often without a scheme.
pub fn normalize_website(blog: &str) -> Option<String> {
    let blog = blog.trim();
    if blog.is_empty() {
        return None;
    }

    let candidate = if blog.starts_with("http://") || blog.starts_with("https://") {
        blog.to_string()
    } else {
        format!("https://{blog}")
    };

    match Url::parse(&candidate) {
        Ok(url) if url.host_str().is_some() => Some(candidate),
        _ => {
            warn!("Dropping unparsable website link: {:?}", blog);
            None
        }
    }
}
