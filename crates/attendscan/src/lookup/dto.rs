//! DTOs for decoding lookup responses.
//!
//! The payload comes from a spreadsheet-backed script, so field types are
//! loose: text fields and event names may arrive as numbers or booleans. The
//! DTOs keep raw JSON values and [`ItemDto::into_record`] does the checking.

use serde::Deserialize;
use serde_json::Value;

use crate::record::AttendeeRecord;

#[derive(Debug, Deserialize)]
pub(super) struct LookupResponseDto {
    pub(super) items: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ItemDto {
    pub(super) name: Option<Value>,
    pub(super) regdno: Option<Value>,
    pub(super) email: Option<Value>,
    pub(super) branch: Option<Value>,
    pub(super) events: Option<Value>,
}

impl ItemDto {
    /// Decode the first element of `items`.
    pub(super) fn from_value(value: Value) -> Result<Self, String> {
        if !value.is_object() {
            return Err(format!(
                "first item must be an object, got {}",
                json_kind(&value)
            ));
        }
        serde_json::from_value(value).map_err(|err| format!("invalid item: {err}"))
    }

    pub(super) fn into_record(self) -> Result<AttendeeRecord, String> {
        let name = scalar_text("name", self.name)?;
        let registration_id = scalar_text("regdno", self.regdno)?;
        let email = scalar_text("email", self.email)?;
        let branch = scalar_text("branch", self.branch)?;
        let events = event_names(self.events)?;

        Ok(AttendeeRecord {
            name,
            registration_id,
            email,
            branch,
            events,
        })
    }
}

fn scalar_text(field: &str, value: Option<Value>) -> Result<String, String> {
    match value {
        Some(value) => coerce_text(&value)
            .ok_or_else(|| format!("`{field}` must be text, got {}", json_kind(&value))),
        None => Err(format!("item is missing `{field}`")),
    }
}

fn event_names(value: Option<Value>) -> Result<Vec<String>, String> {
    match value {
        Some(Value::Array(entries)) => Ok(entries.iter().map(event_text).collect()),
        Some(other) => Err(format!("`events` must be an array, got {}", json_kind(&other))),
        None => Err("item is missing `events`".to_string()),
    }
}

/// Event cells are always kept: non-scalars fall back to their JSON text.
fn event_text(entry: &Value) -> String {
    coerce_text(entry).unwrap_or_else(|| entry.to_string())
}

/// Scalars become their textual form; anything else is a type mismatch.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
