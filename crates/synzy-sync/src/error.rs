//! Synchronizer error types.

use std::fmt;

use synzy_store::StoreError;
use thiserror::Error;

/// Failure reported by the remote shortlist service.
///
/// Mirrors an HTTP error response: a status when one was received and the
/// server's human-readable `message` when the body carried one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.describe())]
pub struct RemoteError {
    pub status: Option<u16>,
    pub message: Option<String>,
}

impl RemoteError {
    #[must_use]
    pub fn new(status: Option<u16>, message: Option<impl Into<String>>) -> Self {
        Self {
            status,
            message: message.map(Into::into),
        }
    }

    /// Transport failure with no response at all.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: Some(message.into()),
        }
    }

    /// Text suitable for a user notification: the server message, else a
    /// generic one.
    #[must_use]
    pub fn user_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("Unknown error")
    }

    fn describe(&self) -> String {
        match self.status {
            Some(status) => format!("{} (status {status})", self.user_message()),
            None => self.user_message().to_string(),
        }
    }
}

/// Which optimistic shortlist mutation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortlistAction {
    Add,
    Remove,
}

impl fmt::Display for ShortlistAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "shortlist",
            Self::Remove => "remove",
        })
    }
}

#[derive(Debug, Error)]
pub enum ShortlistError {
    /// Toggling needs a signed-in user.
    #[error("Please log in to shortlist colleges.")]
    AuthenticationRequired,

    /// The session carries no usable user identifier.
    #[error("session has no user identifier; sign in again")]
    IncompleteSession,

    /// The remote call failed; local state was rolled back.
    #[error("Failed to {action} {name}: {}", source.user_message())]
    Remote {
        action: ShortlistAction,
        name: String,
        #[source]
        source: RemoteError,
    },
}

#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("comparison list storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("comparison list serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn remote_error_prefers_server_message() {
        let err = RemoteError::new(Some(404), Some("Student not found"));
        assert_eq!(err.user_message(), "Student not found");
        assert_eq!(err.to_string(), "Student not found (status 404)");
    }

    #[test]
    fn remote_error_generic_fallback() {
        let err = RemoteError::new(Some(500), None::<String>);
        assert_eq!(err.user_message(), "Unknown error");
        let blank = RemoteError::new(None, Some("  "));
        assert_eq!(blank.to_string(), "Unknown error");
    }

    #[test]
    fn shortlist_error_reads_like_a_notification() {
        let err = ShortlistError::Remote {
            action: ShortlistAction::Add,
            name: "North Campus".into(),
            source: RemoteError::network("connection reset"),
        };
        assert_eq!(err.to_string(), "Failed to shortlist North Campus: connection reset");

        let err = ShortlistError::Remote {
            action: ShortlistAction::Remove,
            name: "North Campus".into(),
            source: RemoteError::new(Some(500), None::<String>),
        };
        assert_eq!(err.to_string(), "Failed to remove North Campus: Unknown error");
    }
}
