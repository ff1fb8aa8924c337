//! Order selected in the header of the edit view.
//!
//! The header order restricts which goods every row may pick. Selecting an
//! order issues a goods lookup; only the answer for the latest selection is
//! applied.

use crate::shared::request_ticket::RequestTicket;
use contracts::domain::a001_good::aggregate::GoodRef;
use contracts::domain::a002_purchase_order::aggregate::OrderId;
use contracts::shared::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoodsRequest {
    pub ticket: RequestTicket,
    pub order_id: OrderId,
}

#[derive(Debug, Clone, Default)]
pub struct OrderScope {
    order_id: Option<OrderId>,
    goods: Option<Vec<GoodRef>>,
    failed: bool,
    last_ticket: u64,
    pending: Option<RequestTicket>,
}

impl OrderScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope for a page rendered with an order already chosen; its goods are
    /// not fetched until the order changes
    pub fn starting_at(order_id: Option<OrderId>) -> Self {
        Self {
            order_id,
            ..Self::default()
        }
    }

    pub fn select_order(&mut self, order_id: Option<OrderId>) -> Option<GoodsRequest> {
        if order_id.is_some() && order_id == self.order_id && !self.failed {
            return None;
        }
        self.order_id = order_id;
        self.goods = None;
        self.failed = false;

        let Some(order_id) = order_id else {
            self.pending = None;
            return None;
        };
        let ticket = RequestTicket::issue(&mut self.last_ticket);
        self.pending = Some(ticket);
        log::debug!("scope: requesting goods of order {}", order_id);
        Some(GoodsRequest { ticket, order_id })
    }

    /// Apply the goods of the current order.
    ///
    /// Returns the list rows should switch to; `None` for a stale or failed
    /// lookup, which leaves every row as it is.
    pub fn goods_loaded(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<GoodRef>, CatalogError>,
    ) -> Option<Vec<GoodRef>> {
        if self.pending != Some(ticket) {
            log::debug!("scope: discarding stale goods list {:?}", ticket);
            return None;
        }
        self.pending = None;

        match result {
            Ok(goods) => {
                if goods.is_empty() {
                    log::warn!("scope: order {:?} has no goods", self.order_id);
                }
                self.goods = Some(goods.clone());
                Some(goods)
            }
            Err(e) => {
                log::error!("scope: goods of order {:?} unavailable: {}", self.order_id, e);
                self.failed = true;
                None
            }
        }
    }

    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    /// Goods of the current order, once loaded
    pub fn goods(&self) -> Option<&[GoodRef]> {
        self.goods.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
