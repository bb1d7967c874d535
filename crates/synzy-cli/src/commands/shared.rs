use anyhow::Context;
use serde_json::Value;
use synzy_core::ids::COLLEGE_ID;
use synzy_core::{Entity, EntityId};

/// Parse an `ENTITY` argument: a JSON object, or a bare id stored as
/// `collegeId`.
pub fn parse_entity(arg: &str) -> anyhow::Result<Entity> {
    let trimmed = arg.trim();
    if trimmed.starts_with('{') {
        let value: Value = serde_json::from_str(trimmed).context("entity is not valid JSON")?;
        return Entity::from_value(value).map_err(anyhow::Error::from);
    }

    let id = EntityId::new(trimmed).context("entity id must not be empty")?;
    if !id.is_object_id() {
        tracing::warn!(id = %id, "id does not look like a document id; storing it anyway");
    }
    Ok(Entity::new().with(COLLEGE_ID, id.as_str()))
}

/// Parse a JSON object argument into a field map.
pub fn parse_object(arg: &str, what: &str) -> anyhow::Result<serde_json::Map<String, Value>> {
    match serde_json::from_str::<Value>(arg).with_context(|| format!("{what} is not valid JSON"))? {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("{what} must be a JSON object, got {}", kind(&other)),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
