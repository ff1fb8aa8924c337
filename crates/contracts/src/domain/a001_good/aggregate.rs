use crate::domain::common::AggregateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a good (`Bien`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoodId(pub i64);

impl GoodId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for GoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AggregateId for GoodId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(GoodId::new)
            .map_err(|e| format!("Invalid good id '{}': {}", s, e))
    }
}

/// A selectable good, as listed by the good selector or `/orden_bienes/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodRef {
    pub id: GoodId,

    /// Display name (`nombre`)
    #[serde(rename = "nombre")]
    pub name: String,
}

impl GoodRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: GoodId::new(id),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_control_values() {
        assert_eq!(GoodId::from_control_value(""), Ok(None));
        assert_eq!(GoodId::from_control_value("  "), Ok(None));
        assert_eq!(GoodId::from_control_value("42"), Ok(Some(GoodId(42))));
        assert!(GoodId::from_control_value("abc").is_err());
    }

    #[test]
    fn test_good_ref_uses_wire_names() {
        let good: GoodRef = serde_json::from_str(r#"{"id": 7, "nombre": "RESMA A4"}"#).unwrap();
        assert_eq!(good, GoodRef::new(7, "RESMA A4"));
    }
}
