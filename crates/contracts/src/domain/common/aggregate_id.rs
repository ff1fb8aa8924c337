use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Identifier of a server-side record as it travels through form controls
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Value written into a `<select>` / hidden input
    fn as_string(&self) -> String;

    /// Parse a non-empty control value
    fn from_string(s: &str) -> Result<Self, String>;

    /// Parse a control value where the empty string means "nothing selected"
    fn from_control_value(s: &str) -> Result<Option<Self>, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Self::from_string(trimmed).map(Some)
    }
}

