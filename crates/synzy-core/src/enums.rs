//! Account kinds and optimistic-mutation lifecycle.
//!
//! All enums use `snake_case` serialization. [`MutationState`] provides
//! `allowed_next_states()` to enforce valid transitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// UserType
// ---------------------------------------------------------------------------

/// Kind of account behind a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[default]
    Student,
    Parent,
    /// Institution account; the school portal calls it `school`.
    #[serde(alias = "school")]
    College,
    Admin,
    /// Any account kind this client does not know. Treated like a
    /// student-side account.
    #[serde(other)]
    Other,
}

impl UserType {
    /// Institutional and admin accounts have no shortlist.
    #[must_use]
    pub const fn is_institutional(self) -> bool {
        matches!(self, Self::College | Self::Admin)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Parent => "parent",
            Self::College => "college",
            Self::Admin => "admin",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "parent" => Ok(Self::Parent),
            "college" | "school" => Ok(Self::College),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown user type '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// MutationState
// ---------------------------------------------------------------------------

/// Lifecycle of one optimistic mutation.
///
/// ```text
/// idle → pending → committed
///                → rolled_back
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MutationState {
    Idle,
    Pending,
    Committed,
    RolledBack,
}

impl MutationState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::Pending],
            Self::Pending => &[Self::Committed, Self::RolledBack],
            Self::Committed | Self::RolledBack => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::RolledBack)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
        }
    }
}

impl fmt::Display for MutationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
