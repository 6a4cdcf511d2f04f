//! Structural validation of status API payloads

use serde_json::{Map, Value};

/// Key of the homework list in the status API payload
pub const HOMEWORKS_KEY: &str = "homeworks";

/// A single homework entry as returned by the status API
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItemRecord {
    fields: Map<String, Value>,
}

impl WorkItemRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Pick the most recent homework out of a raw payload.
///
/// Only index 0 is considered; any older entries in the same payload are
/// dropped, so several status changes between two polls collapse into one.
pub fn check_response(response: &Value) -> crate::Result<WorkItemRecord> {
    let payload = response.as_object().ok_or_else(|| {
        crate::BotError::InvalidShape(format!(
            "expected a JSON object, got {}",
            type_name(response)
        ))
    })?;

    let homeworks = match payload.get(HOMEWORKS_KEY) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(crate::BotError::InvalidShape(format!(
                "'{}' must be a list, got {}",
                HOMEWORKS_KEY,
                type_name(other)
            )))
        }
        None => {
            return Err(crate::BotError::InvalidShape(format!(
                "missing '{}' field",
                HOMEWORKS_KEY
            )))
        }
    };

    let first = homeworks.first().ok_or(crate::BotError::EmptyResult)?;
    match first {
        Value::Object(fields) => Ok(WorkItemRecord::new(fields.clone())),
        other => Err(crate::BotError::InvalidShape(format!(
            "homework entries must be objects, got {}",
            type_name(other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
