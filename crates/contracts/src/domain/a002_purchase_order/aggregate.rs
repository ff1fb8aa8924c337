use crate::domain::common::AggregateId;
use crate::shared::serde_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a purchase order (`OrdenDeCompra`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl OrderId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AggregateId for OrderId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(OrderId::new)
            .map_err(|e| format!("Invalid order id '{}': {}", s, e))
    }
}

/// Purchase order as offered by the order selector in the header of the edit view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRef {
    pub id: OrderId,
    #[serde(rename = "numero")]
    pub display_number: String,
}

impl OrderRef {
    pub fn new(id: i64, display_number: impl Into<String>) -> Self {
        Self {
            id: OrderId::new(id),
            display_number: display_number.into(),
        }
    }
}

/// Purchase order that still has stock of a given good
///
/// Produced by `/ordenes_con_stock_bien/{good}/`; the whole list is replaced
/// every time the good changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOption {
    pub id: OrderId,

    /// Label shown in the order selector, e.g. "OC #0012/2024"
    #[serde(rename = "numero")]
    pub display_number: String,

    /// Purchased minus already delivered (`disponible`)
    #[serde(rename = "disponible", default)]
    pub available_quantity: i64,

    /// Unit price of the good in this order (`precio_unitario`)
    #[serde(
        rename = "precio_unitario",
        default,
        deserialize_with = "serde_decimal::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<Decimal>,
}

impl OrderOption {
    pub fn new(id: i64, display_number: impl Into<String>, available_quantity: i64) -> Self {
        Self {
            id: OrderId::new(id),
            display_number: display_number.into(),
            available_quantity,
            unit_price: None,
        }
    }

    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = Some(unit_price);
        self
    }
}
