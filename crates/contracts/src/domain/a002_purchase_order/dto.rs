//! Payloads of the read-only catalog endpoints

use super::aggregate::OrderOption;
use crate::domain::a001_good::aggregate::GoodRef;
use crate::shared::error::CatalogError;
use crate::shared::serde_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `GET /ordenes_con_stock_bien/{good}/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersWithStockResponse {
    #[serde(rename = "ordenes", default)]
    pub orders: Vec<OrderOption>,
}

/// `GET /orden_bien_stock/{order}/{good}/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderGoodStockResponse {
    pub status: String,
    #[serde(default)]
    pub stock: i64,
}

impl OrderGoodStockResponse {
    pub const STATUS_OK: &'static str = "ok";

    pub fn is_ok(&self) -> bool {
        self.status == Self::STATUS_OK
    }
}

/// Stock and price of a (good, order) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockQuote {
    pub stock: i64,
    pub unit_price: Option<Decimal>,
}

impl StockQuote {
    /// Combine the stock answer with the (optional) price lookup; a
    /// non-`ok` stock status makes the whole quote unavailable
    pub fn from_responses(
        stock: OrderGoodStockResponse,
        unit_price: Option<Decimal>,
    ) -> Result<Self, CatalogError> {
        if !stock.is_ok() {
            return Err(CatalogError::NotFound);
        }
        Ok(Self {
            stock: stock.stock,
            unit_price,
        })
    }
}

/// `GET /orden_precio/{order}/{good}/`
///
/// The server answers `{"precio": ""}` when the good is not part of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPriceResponse {
    #[serde(
        rename = "precio",
        default,
        deserialize_with = "serde_decimal::optional_decimal"
    )]
    pub price: Option<Decimal>,
}

/// `GET /orden_bienes/{order}/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderGoodsResponse {
    #[serde(rename = "bienes", default)]
    pub goods: Vec<GoodRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_purchase_order::aggregate::OrderId;
    use std::str::FromStr;

    #[test]
    fn test_orders_with_stock_ignores_extra_fields() {
        let body = r#"{
            "status": "ok",
            "bien_id": 3,
            "ordenes": [
                {"id": 10, "numero": "OC #A-1", "disponible": 5, "precio_unitario": "12.50"},
                {"id": 11, "numero": "OC #A-2", "disponible": 2}
            ]
        }"#;
        let parsed: OrdersWithStockResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.orders.len(), 2);
        assert_eq!(parsed.orders[0].id, OrderId(10));
        assert_eq!(
            parsed.orders[0].unit_price,
            Some(Decimal::from_str("12.50").unwrap())
        );
        assert_eq!(parsed.orders[1].unit_price, None);
    }

    #[test]
    fn test_missing_orders_key_is_an_empty_list() {
        let parsed: OrdersWithStockResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.orders.is_empty());
    }

    #[test]
    fn test_stock_status() {
        let ok: OrderGoodStockResponse =
            serde_json::from_str(r#"{"status": "ok", "stock": 4, "orden_id": 1}"#).unwrap();
        assert!(ok.is_ok());
        assert_eq!(ok.stock, 4);

        let err: OrderGoodStockResponse =
            serde_json::from_str(r#"{"status": "error", "stock": 0}"#).unwrap();
        assert!(!err.is_ok());
    }

    #[test]
    fn test_empty_price_is_none() {
        let empty: OrderPriceResponse = serde_json::from_str(r#"{"precio": ""}"#).unwrap();
        assert_eq!(empty.price, None);

        let set: OrderPriceResponse = serde_json::from_str(r#"{"precio": "99.90"}"#).unwrap();
        assert_eq!(set.price, Some(Decimal::from_str("99.90").unwrap()));
    }

    #[test]
    fn test_order_goods() {
        let parsed: OrderGoodsResponse =
            serde_json::from_str(r#"{"bienes": [{"id": 1, "nombre": "TONER"}]}"#).unwrap();
        assert_eq!(parsed.goods, vec![GoodRef::new(1, "TONER")]);
    }

    #[test]
    fn test_stock_quote_from_responses() {
        let ok = OrderGoodStockResponse {
            status: "ok".into(),
            stock: 7,
        };
        let price = Decimal::from_str("1.5").unwrap();
        assert_eq!(
            StockQuote::from_responses(ok, Some(price)),
            Ok(StockQuote {
                stock: 7,
                unit_price: Some(price),
            })
        );

        let missing = OrderGoodStockResponse {
            status: "error".into(),
            stock: 0,
        };
        assert_eq!(
            StockQuote::from_responses(missing, None),
            Err(CatalogError::NotFound)
        );
    }
}
