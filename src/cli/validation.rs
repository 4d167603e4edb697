//! Value parsers for CLI arguments that clap cannot check on its own.
//!
//! Job fields are deliberately passed through untouched; the job service owns
//! those rules and reports them with its own messages.

use std::fs;
use std::path::PathBuf;

/// Accepts a path only if it names a readable file.
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }
    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

/// Trims the username and rejects blank ones.
pub fn validate_username(value: &str) -> Result<String, String> {
    let username = value.trim();
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.chars().any(char::is_whitespace) {
        return Err(format!("Username cannot contain spaces, got: '{}'", username));
    }
    Ok(username.to_string())
}
