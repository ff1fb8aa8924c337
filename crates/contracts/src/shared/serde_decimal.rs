//! Lenient decimal parsing for prices sent by the server.
//!
//! Prices arrive as strings (`"12.50"`), occasionally as JSON numbers, and as
//! `""` or `null` when unknown.

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_value(&value).map_err(de::Error::custom)
}

/// Parse a user-typed or server-sent price; blank means unknown
pub fn parse_decimal(raw: &str) -> Result<Option<Decimal>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    // Spanish-locale inputs use a decimal comma
    let normalized = trimmed.replace(',', ".");
    Decimal::from_str(&normalized)
        .map(Some)
        .map_err(|e| format!("Invalid decimal '{}': {}", raw, e))
}

fn parse_value(value: &Value) -> Result<Option<Decimal>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => parse_decimal(s),
        Value::Number(n) => parse_decimal(&n.to_string()),
        other => Err(format!("Expected a decimal, got {}", other)),
    }
}
