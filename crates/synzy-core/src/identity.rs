use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::UserType;
use crate::errors::CoreError;

/// The persisted user record (`userData`), as produced by login and profile
/// hydration. Unknown profile fields are carried in `profile` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Account document id (`_id`).
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Auth record id; preferred over `_id` for shortlist calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_id: Option<String>,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// Lightweight authenticated session for cross-crate passing.
///
/// Produced by `synzy-auth`, consumed by the synchronizers. Data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Session {
    pub user: UserRecord,
    pub token: String,
}

impl Session {
    #[must_use]
    pub const fn new(user: UserRecord, token: String) -> Self {
        Self { user, token }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        non_empty(self.user.user_id.as_deref())
    }

    #[must_use]
    pub fn auth_id(&self) -> Option<&str> {
        non_empty(self.user.auth_id.as_deref())
    }

    #[must_use]
    pub const fn user_type(&self) -> UserType {
        self.user.user_type
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Identifier used for per-user remote calls: `authId`, else `_id`,
    /// else a legacy `id` profile field.
    #[must_use]
    pub fn canonical_id(&self) -> Option<&str> {
        self.auth_id()
            .or_else(|| self.user_id())
            .or_else(|| non_empty(self.user.profile.get("id").and_then(Value::as_str)))
    }

    /// Shallow-merge a profile patch into the user record. Patch keys win,
    /// including `_id`, `authId` and `userType`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] if the merged record no longer describes a
    /// valid user (for example a non-string `_id`).
    pub fn merge_profile(&mut self, patch: Map<String, Value>) -> Result<(), CoreError> {
        let Value::Object(mut merged) = serde_json::to_value(&self.user)? else {
            return Err(CoreError::Validation("user record is not an object".into()));
        };
        merged.extend(patch);
        self.user = serde_json::from_value(Value::Object(merged))?;
        Ok(())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
