//! Entity identity.
//!
//! An institution can carry its id under `collegeId`, `_id` or `id`
//! depending on which endpoint produced it. [`IdResolver`] encodes the
//! priority order as data so every call site agrees on it.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::Entity;

/// Primary id field used by the college catalogue.
pub const COLLEGE_ID: &str = "collegeId";
/// Document id field from the backing store.
pub const DOCUMENT_ID: &str = "_id";
/// Legacy id field still produced by some list endpoints.
pub const LEGACY_ID: &str = "id";

/// A resolved, non-empty entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Returns `None` for empty input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    /// Read an id from a JSON value: non-empty strings, or integers rendered
    /// in decimal.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::new(s.as_str()),
            Value::Number(n) => Self::new(n.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id has the 24-hex-digit document id format.
    #[must_use]
    pub fn is_object_id(&self) -> bool {
        self.0.len() == 24 && self.0.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Prioritized list of id-field accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdResolver {
    fields: &'static [&'static str],
}

impl IdResolver {
    /// Shortlist identity: `collegeId`, then `_id`, then `id`.
    pub const SHORTLIST: Self = Self::new(&[COLLEGE_ID, DOCUMENT_ID, LEGACY_ID]);

    /// Comparison identity: `collegeId`, then `_id`.
    pub const COMPARISON: Self = Self::new(&[COLLEGE_ID, DOCUMENT_ID]);

    #[must_use]
    pub const fn new(fields: &'static [&'static str]) -> Self {
        Self { fields }
    }

    #[must_use]
    pub const fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// First populated alias in priority order.
    #[must_use]
    pub fn resolve(&self, entity: &Entity) -> Option<EntityId> {
        self.fields
            .iter()
            .find_map(|field| entity.get(field).and_then(EntityId::from_value))
    }

    /// Every populated alias, in priority order, without duplicates.
    #[must_use]
    pub fn aliases(&self, entity: &Entity) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            if let Some(id) = entity.get(field).and_then(EntityId::from_value)
                && !ids.contains(&id)
            {
                ids.push(id);
            }
        }
        ids
    }

    /// Loose identity: true when any alias of `a` equals any alias of `b`.
    #[must_use]
    pub fn matches_any(&self, a: &Entity, b: &Entity) -> bool {
        let left = self.aliases(a);
        if left.is_empty() {
            return false;
        }
        self.aliases(b).iter().any(|id| left.contains(id))
    }

    /// Strict identity: both sides resolve and the resolved ids are equal.
    #[must_use]
    pub fn same_identity(&self, a: &Entity, b: &Entity) -> bool {
        matches!((self.resolve(a), self.resolve(b)), (Some(x), Some(y)) if x == y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn entity(value: serde_json::Value) -> Entity {
        Entity::from_value(value).expect("object")
    }

    #[rstest]
    #[case(json!({ "collegeId": "c1", "_id": "d1", "id": "l1" }), Some("c1"))]
    #[case(json!({ "_id": "d1", "id": "l1" }), Some("d1"))]
    #[case(json!({ "id": "l1" }), Some("l1"))]
    #[case(json!({ "collegeId": "", "_id": "d1" }), Some("d1"))]
    #[case(json!({ "id": 42 }), Some("42"))]
    #[case(json!({ "name": "no id" }), None)]
    fn shortlist_priority(#[case] value: serde_json::Value, #[case] expected: Option<&str>) {
        let resolved = IdResolver::SHORTLIST.resolve(&entity(value));
        assert_eq!(resolved.as_ref().map(EntityId::as_str), expected);
    }

    #[test]
    fn comparison_ignores_legacy_id() {
        let e = entity(json!({ "id": "l1" }));
        assert_eq!(IdResolver::COMPARISON.resolve(&e), None);
    }

    #[test]
    fn aliases_deduplicate() {
        let e = entity(json!({ "collegeId": "x", "_id": "x", "id": "y" }));
        let ids: Vec<String> = IdResolver::SHORTLIST
            .aliases(&e)
            .into_iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(ids, vec!["x".to_string(), "y".to_string()]);
    }

    #[rstest]
    #[case(json!({ "collegeId": "A" }), json!({ "_id": "A" }), true)]
    #[case(json!({ "_id": "A", "collegeId": "B" }), json!({ "id": "A" }), true)]
    #[case(json!({ "id": "A" }), json!({ "collegeId": "B", "_id": "A" }), true)]
    #[case(json!({ "collegeId": "A" }), json!({ "collegeId": "B" }), false)]
    #[case(json!({ "name": "x" }), json!({ "name": "x" }), false)]
    fn loose_matching(
        #[case] a: serde_json::Value,
        #[case] b: serde_json::Value,
        #[case] expected: bool,
    ) {
        let (a, b) = (entity(a), entity(b));
        assert_eq!(IdResolver::SHORTLIST.matches_any(&a, &b), expected);
        assert_eq!(IdResolver::SHORTLIST.matches_any(&b, &a), expected);
    }

    #[test]
    fn strict_identity_uses_resolved_ids() {
        let a = entity(json!({ "collegeId": "A", "_id": "Z" }));
        let b = entity(json!({ "_id": "A" }));
        assert!(!IdResolver::COMPARISON.same_identity(&a, &b));
        let c = entity(json!({ "_id": "A" }));
        assert!(IdResolver::COMPARISON.same_identity(&b, &c));
    }

    #[test]
    fn object_id_format() {
        let valid = EntityId::new("64b7f0c2a1b2c3d4e5f60718").expect("non-empty");
        assert!(valid.is_object_id());
        let short = EntityId::new("64b7f0c2").expect("non-empty");
        assert!(!short.is_object_id());
        let not_hex = EntityId::new("zzzzzzzzzzzzzzzzzzzzzzzz").expect("non-empty");
        assert!(!not_hex.is_object_id());
        assert!(EntityId::new("").is_none());
    }
}
