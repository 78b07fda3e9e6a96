use serde::{Deserialize, Serialize};
use std::fmt;

/// Error categories surfaced by the settings core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum SettingsError {
    /// Transport-level failure (DNS, refused connection, timeout)
    Transport(String),

    /// Endpoint answered with an unexpected HTTP status
    HttpStatus(u16, String),

    /// Response body did not match the expected catalog schema
    Decode(String),

    /// Missing or malformed required field (no base URL, bad scheme, etc.)
    Configuration(String),

    /// Preference store read/write errors
    Storage(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SettingsError::Transport(msg) => write!(f, "Connection failed: {}", msg),
            SettingsError::HttpStatus(status, text) => write!(f, "HTTP {}: {}", status, text),
            SettingsError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            SettingsError::Configuration(msg) => write!(f, "Configuration Error: {}", msg),
            SettingsError::Storage(msg) => write!(f, "Storage Error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

impl SettingsError {
    /// Returns a user-friendly title for the error
    pub fn title(&self) -> &str {
        match self {
            SettingsError::Transport(_) => "Connection Failed",
            SettingsError::HttpStatus(_, _) => "Service Error",
            SettingsError::Decode(_) => "Unexpected Response",
            SettingsError::Configuration(_) => "Configuration Problem",
            SettingsError::Storage(_) => "Storage Error",
        }
    }

    /// Returns whether this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            SettingsError::Transport(_) => true,   // Network might recover
            SettingsError::HttpStatus(_, _) => true, // Server might recover
            SettingsError::Decode(_) => true,      // Might be a transient proxy page
            SettingsError::Configuration(_) => false, // Needs a manual fix
            SettingsError::Storage(_) => true,     // Might be a transient disk issue
        }
    }
}
