//! Shortlist synchronizer configuration.

use serde::{Deserialize, Serialize};

/// Remote messages meaning "this user has no student profile yet".
fn default_not_found_messages() -> Vec<String> {
    vec!["Student not found".to_string()]
}

const fn default_background_refresh() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShortlistConfig {
    /// Remote error messages (compared case-insensitively) that mean the
    /// shortlist is simply empty.
    #[serde(default = "default_not_found_messages")]
    pub not_found_messages: Vec<String>,

    /// Re-fetch the shortlist after a successful add to pick up the
    /// server-assigned shape.
    #[serde(default = "default_background_refresh")]
    pub background_refresh: bool,
}

impl Default for ShortlistConfig {
    fn default() -> Self {
        Self {
            not_found_messages: default_not_found_messages(),
            background_refresh: default_background_refresh(),
        }
    }
}

impl ShortlistConfig {
    /// Whether a remote message is one of the configured not-found messages.
    #[must_use]
    pub fn is_not_found_message(&self, message: &str) -> bool {
        let message = message.trim();
        self.not_found_messages
            .iter()
            .any(|m| m.eq_ignore_ascii_case(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ShortlistConfig::default();
        assert!(config.background_refresh);
        assert_eq!(config.not_found_messages, vec!["Student not found"]);
    }

    #[test]
    fn not_found_matching_ignores_case() {
        let config = ShortlistConfig::default();
        assert!(config.is_not_found_message("Student Not Found"));
        assert!(config.is_not_found_message("student not found "));
        assert!(!config.is_not_found_message("Internal server error"));
    }
}
