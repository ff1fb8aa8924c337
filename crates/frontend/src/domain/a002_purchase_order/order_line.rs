//! One line of the purchase order edit view: good, quantity, editable unit
//! price and the derived line total.

use crate::shared::components::table::format_input_decimal;
use crate::shared::quantity::parse_quantity;
use crate::shared::request_ticket::RequestTicket;
use contracts::domain::a001_good::aggregate::{GoodId, GoodRef};
use contracts::domain::a002_purchase_order::aggregate::OrderId;
use contracts::shared::error::CatalogError;
use contracts::shared::serde_decimal::parse_decimal;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRequest {
    pub ticket: RequestTicket,
    pub order_id: OrderId,
    pub good_id: GoodId,
}

#[derive(Debug, Clone, Default)]
pub struct OrderLineController {
    good_id: Option<GoodId>,
    /// Goods offered by the header order; `None` while unrestricted
    goods: Option<Vec<GoodRef>>,
    order_id: Option<OrderId>,
    price_input: String,
    unit_price: Option<Decimal>,
    quantity_input: String,
    quantity: Option<u64>,
    last_ticket: u64,
    pending_price: Option<RequestTicket>,
}

impl OrderLineController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize a line rendered by the server
    pub fn restore(&mut self, good_id: Option<GoodId>, quantity_input: &str, price_input: &str) {
        self.good_id = good_id;
        self.edit_quantity(quantity_input);
        self.edit_price(price_input);
    }

    /// Pick a good. Under a header order its price is looked up again.
    pub fn select_good(&mut self, good_id: Option<GoodId>) -> Option<PriceRequest> {
        if good_id == self.good_id {
            return None;
        }
        self.good_id = good_id;
        self.pending_price = None;

        match (self.order_id, good_id) {
            (Some(_), None) => {
                self.clear_price();
                None
            }
            (Some(order_id), Some(good_id)) => {
                self.clear_price();
                Some(self.request_price(order_id, good_id))
            }
            (None, _) => None,
        }
    }

    /// Switch to the goods of a newly selected header order.
    ///
    /// The current good survives only if the order still offers it; a
    /// surviving good gets its price from that order.
    pub fn replace_goods(&mut self, order_id: OrderId, goods: Vec<GoodRef>) -> Option<PriceRequest> {
        self.order_id = Some(order_id);
        self.pending_price = None;
        if let Some(current) = self.good_id {
            if !goods.iter().any(|g| g.id == current) {
                log::debug!("line: good {} not in order {}, clearing", current, order_id);
                self.good_id = None;
                self.clear_price();
            }
        }
        self.goods = Some(goods);

        let good_id = self.good_id?;
        Some(self.request_price(order_id, good_id))
    }

    /// Order used for price lookups when the good changes; the good list is
    /// left as it is
    pub fn scope_to(&mut self, order_id: Option<OrderId>) {
        self.order_id = order_id;
    }

    /// Drop the header restriction; values stay as they are
    pub fn clear_scope(&mut self) {
        self.order_id = None;
        self.goods = None;
        self.pending_price = None;
    }

    /// Apply a price lookup. An empty price clears the input. Returns `false`
    /// for a stale result.
    pub fn price_loaded(
        &mut self,
        ticket: RequestTicket,
        result: Result<Option<Decimal>, CatalogError>,
    ) -> bool {
        if self.pending_price != Some(ticket) {
            log::debug!("line: discarding stale price {:?}", ticket);
            return false;
        }
        self.pending_price = None;

        let price = result.unwrap_or_else(|e| {
            log::warn!("line: price of good {:?} unavailable: {}", self.good_id, e);
            None
        });
        self.unit_price = price;
        self.price_input = format_input_decimal(price);
        true
    }

    /// Manual price entry; a price typed by the user wins over a lookup in flight
    pub fn edit_price(&mut self, raw: &str) {
        self.pending_price = None;
        self.price_input = raw.to_string();
        self.unit_price = parse_decimal(raw).ok().flatten();
    }

    pub fn edit_quantity(&mut self, raw: &str) {
        self.quantity_input = raw.to_string();
        self.quantity = parse_quantity(raw);
    }

    pub fn good_id(&self) -> Option<GoodId> {
        self.good_id
    }

    pub fn goods(&self) -> Option<&[GoodRef]> {
        self.goods.as_deref()
    }

    pub fn price_input(&self) -> &str {
        &self.price_input
    }

    pub fn unit_price(&self) -> Option<Decimal> {
        self.unit_price
    }

    pub fn quantity_input(&self) -> &str {
        &self.quantity_input
    }

    pub fn is_loading_price(&self) -> bool {
        self.pending_price.is_some()
    }

    /// quantity × unit price; unknown when either operand is unknown
    pub fn line_total(&self) -> Option<Decimal> {
        let quantity = self.quantity?;
        self.unit_price?.checked_mul(Decimal::from(quantity))
    }

    fn request_price(&mut self, order_id: OrderId, good_id: GoodId) -> PriceRequest {
        let ticket = RequestTicket::issue(&mut self.last_ticket);
        self.pending_price = Some(ticket);
        PriceRequest {
            ticket,
            order_id,
            good_id,
        }
    }

    fn clear_price(&mut self) {
        self.unit_price = None;
        self.price_input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn goods() -> Vec<GoodRef> {
        vec![GoodRef::new(1, "RESMA A4"), GoodRef::new(2, "TONER")]
    }

    #[test]
    fn test_line_total() {
        let mut line = OrderLineController::new();
        line.edit_quantity("3");
        assert_eq!(line.line_total(), None);

        line.edit_price("12,50");
        assert_eq!(line.unit_price(), Some(dec("12.50")));
        assert_eq!(line.line_total(), Some(dec("37.50")));

        line.edit_quantity("abc");
        assert_eq!(line.line_total(), None);
    }

    #[test]
    fn test_replace_goods_keeps_offered_good() {
        let mut line = OrderLineController::new();
        line.restore(Some(GoodId(2)), "1", "5.00");

        let request = line.replace_goods(OrderId(7), goods()).unwrap();
        assert_eq!(request.good_id, GoodId(2));
        assert_eq!(request.order_id, OrderId(7));
        assert_eq!(line.good_id(), Some(GoodId(2)));
        assert!(line.is_loading_price());

        assert!(line.price_loaded(request.ticket, Ok(Some(dec("99.9")))));
        assert_eq!(line.price_input(), "99.90");
        assert_eq!(line.line_total(), Some(dec("99.90")));
    }

    #[test]
    fn test_replace_goods_clears_missing_good() {
        let mut line = OrderLineController::new();
        line.restore(Some(GoodId(5)), "1", "5.00");

        assert_eq!(line.replace_goods(OrderId(7), goods()), None);
        assert_eq!(line.good_id(), None);
        assert_eq!(line.price_input(), "");
        assert_eq!(line.goods().map(|g| g.len()), Some(2));
    }

    #[test]
    fn test_empty_price_clears_input() {
        let mut line = OrderLineController::new();
        line.replace_goods(OrderId(7), goods());
        let request = line.select_good(Some(GoodId(1))).unwrap();

        assert!(line.price_loaded(request.ticket, Ok(None)));
        assert_eq!(line.price_input(), "");
        assert_eq!(line.unit_price(), None);
    }

    #[test]
    fn test_stale_price_is_discarded() {
        let mut line = OrderLineController::new();
        line.replace_goods(OrderId(7), goods());
        let first = line.select_good(Some(GoodId(1))).unwrap();
        let second = line.select_good(Some(GoodId(2))).unwrap();

        assert!(!line.price_loaded(first.ticket, Ok(Some(dec("1")))));
        assert_eq!(line.unit_price(), None);
        assert!(line.price_loaded(second.ticket, Ok(Some(dec("2")))));
        assert_eq!(line.unit_price(), Some(dec("2")));
    }

    #[test]
    fn test_typed_price_wins_over_pending_lookup() {
        let mut line = OrderLineController::new();
        line.replace_goods(OrderId(7), goods());
        let request = line.select_good(Some(GoodId(1))).unwrap();
        line.edit_price("10");

        assert!(!line.price_loaded(request.ticket, Ok(Some(dec("1")))));
        assert_eq!(line.unit_price(), Some(dec("10")));
    }

    #[test]
    fn test_initial_order_drives_price_lookup() {
        let mut line = OrderLineController::new();
        line.restore(Some(GoodId(1)), "2", "3.00");
        line.scope_to(Some(OrderId(7)));
        assert_eq!(line.goods(), None);

        let request = line.select_good(Some(GoodId(2))).unwrap();
        assert_eq!(request.order_id, OrderId(7));
        assert_eq!(line.price_input(), "");
    }

    #[test]
    fn test_unscoped_good_change_keeps_price() {
        let mut line = OrderLineController::new();
        line.edit_price("4");
        assert_eq!(line.select_good(Some(GoodId(1))), None);
        assert_eq!(line.unit_price(), Some(dec("4")));
    }
}
