//! Where the CLI keeps its session token between invocations.
//!
//! A single plain-text file holding the token. `HABITS_SESSION_FILE`
//! overrides the location; otherwise it lives in the home directory.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Path of the session token file
pub fn session_file() -> PathBuf {
    if let Ok(path) = std::env::var("HABITS_SESSION_FILE") {
        return PathBuf::from(path);
    }
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".habits-session"),
        Err(_) => PathBuf::from(".habits-session"),
    }
}

/// Load the saved token, if any
pub fn load_token() -> Option<String> {
    let token = fs::read_to_string(session_file()).ok()?;
    let token = token.trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Persist a token for later invocations
pub fn save_token(token: &str) -> Result<()> {
    let path = session_file();
    fs::write(&path, token)
        .with_context(|| format!("Failed to write session file {}", path.display()))
}

/// Forget the saved token; missing files are fine
pub fn clear_token() -> Result<()> {
    let path = session_file();
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to remove session file {}", path.display()))
        }
    }
}
