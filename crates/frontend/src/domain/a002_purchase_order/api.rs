//! Read-only JSON endpoints for purchase orders and their goods.

use crate::shared::api_utils::join_url;
use contracts::domain::a001_good::aggregate::{GoodId, GoodRef};
use contracts::domain::a002_purchase_order::aggregate::{OrderId, OrderOption};
use contracts::domain::a002_purchase_order::dto::{
    OrderGoodStockResponse, OrderGoodsResponse, OrderPriceResponse, OrdersWithStockResponse,
    StockQuote,
};
use contracts::shared::error::CatalogError;
use gloo_net::http::Request;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCatalog {
    api_base: String,
}

impl OrderCatalog {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    pub fn orders_with_stock_url(&self, good: GoodId) -> String {
        join_url(&self.api_base, &format!("/ordenes_con_stock_bien/{}/", good))
    }

    pub fn order_good_stock_url(&self, order: OrderId, good: GoodId) -> String {
        join_url(&self.api_base, &format!("/orden_bien_stock/{}/{}/", order, good))
    }

    pub fn order_price_url(&self, order: OrderId, good: GoodId) -> String {
        join_url(&self.api_base, &format!("/orden_precio/{}/{}/", order, good))
    }

    pub fn order_goods_url(&self, order: OrderId) -> String {
        join_url(&self.api_base, &format!("/orden_bienes/{}/", order))
    }

    /// Orders that still hold stock of `good`
    pub async fn fetch_orders_with_stock(
        &self,
        good: GoodId,
    ) -> Result<Vec<OrderOption>, CatalogError> {
        let body: OrdersWithStockResponse = get_json(&self.orders_with_stock_url(good)).await?;
        Ok(body.orders)
    }

    /// Stock of `good` in `order`, followed by its unit price.
    ///
    /// A failed price lookup leaves the price unknown without discarding
    /// the stock.
    pub async fn fetch_stock_quote(
        &self,
        order: OrderId,
        good: GoodId,
    ) -> Result<StockQuote, CatalogError> {
        let stock: OrderGoodStockResponse =
            get_json(&self.order_good_stock_url(order, good)).await?;
        let price = match self.fetch_order_price(order, good).await {
            Ok(price) => price,
            Err(e) => {
                log::warn!("Price of good {} in order {} unavailable: {}", good, order, e);
                None
            }
        };
        StockQuote::from_responses(stock, price)
    }

    pub async fn fetch_order_price(
        &self,
        order: OrderId,
        good: GoodId,
    ) -> Result<Option<Decimal>, CatalogError> {
        let body: OrderPriceResponse = get_json(&self.order_price_url(order, good)).await?;
        Ok(body.price)
    }

    /// Goods purchased in `order`
    pub async fn fetch_order_goods(&self, order: OrderId) -> Result<Vec<GoodRef>, CatalogError> {
        let body: OrderGoodsResponse = get_json(&self.order_goods_url(order)).await?;
        Ok(body.goods)
    }
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, CatalogError> {
    log::debug!("GET {}", url);
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| CatalogError::Transport(e.to_string()))?;

    if response.status() == 404 {
        return Err(CatalogError::NotFound);
    }
    if !response.ok() {
        return Err(CatalogError::Status(response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| CatalogError::Malformed(e.to_string()))
}
