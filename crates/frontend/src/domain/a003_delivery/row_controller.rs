//! State machine of one delivery item row.
//!
//! The controller never performs I/O. Transitions that need data return a
//! request carrying a [`RequestTicket`]; the caller performs the lookup and
//! feeds the result back with the same ticket. A result whose ticket is not
//! the row's current one is dropped, so a slow answer for a good the user
//! already abandoned can never populate the row.

use super::validation::{validate_quantity, QuantityValidity};
use crate::shared::quantity::parse_quantity;
use crate::shared::request_ticket::RequestTicket;
use contracts::domain::a001_good::aggregate::GoodId;
use contracts::domain::a002_purchase_order::aggregate::{OrderId, OrderOption};
use contracts::domain::a002_purchase_order::dto::StockQuote;
use contracts::shared::error::CatalogError;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPhase {
    /// No good selected
    #[default]
    Empty,
    /// Good chosen, order list loading or loaded
    GoodSelected,
    /// Good and order chosen
    OrderSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdersRequest {
    pub ticket: RequestTicket,
    pub good_id: GoodId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockRequest {
    pub ticket: RequestTicket,
    pub good_id: GoodId,
    pub order_id: OrderId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrdersStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct RowController {
    phase: RowPhase,
    good_id: Option<GoodId>,
    order_id: Option<OrderId>,
    options: Vec<OrderOption>,
    orders_status: OrdersStatus,
    available_stock: Option<i64>,
    unit_price: Option<Decimal>,
    quantity_input: String,
    quantity: Option<u64>,
    validity: QuantityValidity,
    /// Order already stored for a server-rendered row
    preselected_order: Option<OrderId>,
    last_ticket: u64,
    pending_orders: Option<RequestTicket>,
    pending_stock: Option<RequestTicket>,
}

impl RowController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize a row rendered by the server with existing values.
    ///
    /// A stored order is kept if it is still offered once the order list
    /// arrives; it takes precedence over single-option auto-selection.
    pub fn restore(
        &mut self,
        good_id: Option<GoodId>,
        order_id: Option<OrderId>,
        quantity_input: &str,
    ) -> Option<OrdersRequest> {
        self.edit_quantity(quantity_input);
        let request = self.select_good(good_id);
        if request.is_some() {
            self.preselected_order = order_id;
        }
        request
    }

    // === Transitions ===

    pub fn select_good(&mut self, good_id: Option<GoodId>) -> Option<OrdersRequest> {
        if good_id.is_some()
            && good_id == self.good_id
            && self.orders_status != OrdersStatus::Failed
        {
            log::debug!("row: good {:?} already selected, ignoring", good_id);
            return None;
        }

        // Dependent fields are cleared before any lookup is issued
        self.good_id = good_id;
        self.order_id = None;
        self.options.clear();
        self.available_stock = None;
        self.unit_price = None;
        self.preselected_order = None;
        self.pending_stock = None;
        self.revalidate();

        let Some(good_id) = good_id else {
            self.phase = RowPhase::Empty;
            self.pending_orders = None;
            self.orders_status = OrdersStatus::Idle;
            return None;
        };

        self.phase = RowPhase::GoodSelected;
        self.orders_status = OrdersStatus::Loading;
        let ticket = self.issue_ticket();
        self.pending_orders = Some(ticket);
        log::debug!("row: requesting orders for good {}", good_id);
        Some(OrdersRequest { ticket, good_id })
    }

    /// Apply the order list for the current good.
    ///
    /// Returns the stock lookup of an order chosen without user interaction
    /// (stored order of a restored row, or the only option offered).
    pub fn orders_loaded(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<OrderOption>, CatalogError>,
    ) -> Option<StockRequest> {
        if self.pending_orders != Some(ticket) {
            log::debug!("row: discarding stale order list {:?}", ticket);
            return None;
        }
        self.pending_orders = None;

        let options = match result {
            Ok(options) => options,
            Err(e) => {
                log::error!("row: order lookup for good {:?} failed: {}", self.good_id, e);
                self.options.clear();
                self.orders_status = OrdersStatus::Failed;
                self.preselected_order = None;
                return None;
            }
        };

        self.options = options;
        self.orders_status = OrdersStatus::Loaded;

        if self.options.is_empty() {
            log::warn!("row: no orders with stock for good {:?}", self.good_id);
            self.preselected_order = None;
            return None;
        }

        let preselected = match self.preselected_order.take() {
            Some(order_id) if self.has_option(order_id) => Some(order_id),
            Some(order_id) => {
                log::warn!("row: stored order {} is no longer offered", order_id);
                None
            }
            None => None,
        };
        let single = match self.options.as_slice() {
            [only] => Some(only.id),
            _ => None,
        };

        let target = preselected.or(single)?;
        self.select_order(Some(target))
    }

    pub fn select_order(&mut self, order_id: Option<OrderId>) -> Option<StockRequest> {
        let Some(order_id) = order_id else {
            self.order_id = None;
            self.pending_stock = None;
            self.available_stock = None;
            self.unit_price = None;
            self.phase = if self.good_id.is_some() {
                RowPhase::GoodSelected
            } else {
                RowPhase::Empty
            };
            self.revalidate();
            return None;
        };

        let Some(good_id) = self.good_id else {
            log::warn!("row: order {} selected without a good", order_id);
            return None;
        };
        if !self.has_option(order_id) {
            log::warn!("row: order {} is not offered for good {}", order_id, good_id);
            return None;
        }
        if self.order_id == Some(order_id)
            && self.phase == RowPhase::OrderSelected
            && (self.pending_stock.is_some() || self.available_stock.is_some())
        {
            log::debug!("row: order {} already selected, ignoring", order_id);
            return None;
        }

        self.order_id = Some(order_id);
        self.phase = RowPhase::OrderSelected;
        self.available_stock = None;
        self.unit_price = None;
        self.revalidate();

        let ticket = self.issue_ticket();
        self.pending_stock = Some(ticket);
        log::debug!("row: requesting stock for order {} / good {}", order_id, good_id);
        Some(StockRequest {
            ticket,
            good_id,
            order_id,
        })
    }

    /// Apply the stock/price lookup. Returns `false` for a stale result.
    pub fn stock_loaded(
        &mut self,
        ticket: RequestTicket,
        result: Result<StockQuote, CatalogError>,
    ) -> bool {
        if self.pending_stock != Some(ticket) {
            log::debug!("row: discarding stale stock quote {:?}", ticket);
            return false;
        }
        self.pending_stock = None;

        match result {
            Ok(quote) => {
                let offered_price = self.selected_option().and_then(|o| o.unit_price);
                self.available_stock = Some(quote.stock);
                self.unit_price = quote.unit_price.or(offered_price);
            }
            Err(e) => {
                log::warn!(
                    "row: stock lookup for order {:?} / good {:?} failed: {}",
                    self.order_id,
                    self.good_id,
                    e
                );
                self.available_stock = None;
                self.unit_price = None;
            }
        }
        self.revalidate();
        true
    }

    pub fn edit_quantity(&mut self, raw: &str) {
        self.quantity_input = raw.to_string();
        self.quantity = parse_quantity(raw);
        self.revalidate();
    }

    // === Queries ===

    pub fn phase(&self) -> RowPhase {
        self.phase
    }

    pub fn good_id(&self) -> Option<GoodId> {
        self.good_id
    }

    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    pub fn options(&self) -> &[OrderOption] {
        &self.options
    }

    pub fn orders_status(&self) -> OrdersStatus {
        self.orders_status
    }

    pub fn is_loading_stock(&self) -> bool {
        self.pending_stock.is_some()
    }

    pub fn available_stock(&self) -> Option<i64> {
        self.available_stock
    }

    pub fn unit_price(&self) -> Option<Decimal> {
        self.unit_price
    }

    pub fn quantity(&self) -> Option<u64> {
        self.quantity
    }

    pub fn quantity_input(&self) -> &str {
        &self.quantity_input
    }

    pub fn validity(&self) -> QuantityValidity {
        self.validity
    }

    /// quantity × unit price; unknown when either operand is unknown
    pub fn line_total(&self) -> Option<Decimal> {
        let quantity = self.quantity?;
        self.unit_price?.checked_mul(Decimal::from(quantity))
    }

    pub fn selected_option(&self) -> Option<&OrderOption> {
        let order_id = self.order_id?;
        self.options.iter().find(|o| o.id == order_id)
    }

    // === Private helpers ===

    fn has_option(&self, order_id: OrderId) -> bool {
        self.options.iter().any(|o| o.id == order_id)
    }

    fn issue_ticket(&mut self) -> RequestTicket {
        RequestTicket::issue(&mut self.last_ticket)
    }

    fn revalidate(&mut self) {
        self.validity = validate_quantity(self.quantity, self.available_stock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn order(id: i64, available: i64, price: &str) -> OrderOption {
        OrderOption::new(id, format!("OC #{}", id), available).with_unit_price(dec(price))
    }

    fn quote(stock: i64, price: Option<&str>) -> StockQuote {
        StockQuote {
            stock,
            unit_price: price.map(dec),
        }
    }

    #[test]
    fn test_selecting_good_requests_orders() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(3))).unwrap();
        assert_eq!(request.good_id, GoodId(3));
        assert_eq!(row.phase(), RowPhase::GoodSelected);
        assert_eq!(row.orders_status(), OrdersStatus::Loading);
    }

    #[test]
    fn test_zero_orders_leaves_placeholder_and_unknown_fields() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(3))).unwrap();
        assert_eq!(row.orders_loaded(request.ticket, Ok(vec![])), None);

        assert!(row.options().is_empty());
        assert_eq!(row.order_id(), None);
        assert_eq!(row.available_stock(), None);
        assert_eq!(row.unit_price(), None);
        assert_eq!(row.line_total(), None);
        assert_eq!(row.phase(), RowPhase::GoodSelected);
    }

    #[test]
    fn test_single_order_is_auto_selected() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(3))).unwrap();
        let stock_request = row
            .orders_loaded(request.ticket, Ok(vec![order(10, 5, "12.50")]))
            .unwrap();

        assert_eq!(stock_request.order_id, OrderId(10));
        assert_eq!(stock_request.good_id, GoodId(3));
        assert_eq!(row.order_id(), Some(OrderId(10)));
        assert_eq!(row.phase(), RowPhase::OrderSelected);

        assert!(row.stock_loaded(stock_request.ticket, Ok(quote(5, Some("12.50")))));
        assert_eq!(row.available_stock(), Some(5));
        assert_eq!(row.unit_price(), Some(dec("12.50")));
    }

    #[test]
    fn test_auto_select_happens_once_per_good_selection() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(3))).unwrap();
        assert!(row
            .orders_loaded(request.ticket, Ok(vec![order(10, 5, "1")]))
            .is_some());
        // A repeated delivery of the same answer is ignored
        assert!(row
            .orders_loaded(request.ticket, Ok(vec![order(10, 5, "1")]))
            .is_none());
    }

    #[test]
    fn test_several_orders_wait_for_the_user() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(3))).unwrap();
        let follow_up = row.orders_loaded(
            request.ticket,
            Ok(vec![order(10, 5, "1"), order(11, 2, "2")]),
        );
        assert_eq!(follow_up, None);
        assert_eq!(row.order_id(), None);
        assert_eq!(row.options().len(), 2);

        let stock_request = row.select_order(Some(OrderId(11))).unwrap();
        assert_eq!(stock_request.order_id, OrderId(11));
        assert!(row.stock_loaded(stock_request.ticket, Ok(quote(2, None))));
        // Missing price falls back to the one offered with the order
        assert_eq!(row.unit_price(), Some(dec("2")));
    }

    #[test]
    fn test_changing_good_clears_before_new_data_arrives() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(1))).unwrap();
        let stock_request = row
            .orders_loaded(request.ticket, Ok(vec![order(10, 5, "3.00")]))
            .unwrap();
        row.stock_loaded(stock_request.ticket, Ok(quote(5, Some("3.00"))));
        row.edit_quantity("2");
        assert_eq!(row.line_total(), Some(dec("6.00")));

        // The new lookup never resolves
        let _pending = row.select_good(Some(GoodId(2))).unwrap();
        assert_eq!(row.order_id(), None);
        assert!(row.options().is_empty());
        assert_eq!(row.available_stock(), None);
        assert_eq!(row.unit_price(), None);
        assert_eq!(row.line_total(), None);
        assert!(row.validity().is_valid());
    }

    #[test]
    fn test_late_response_for_abandoned_good_is_discarded() {
        let mut row = RowController::new();
        let for_a = row.select_good(Some(GoodId(1))).unwrap();
        let for_b = row.select_good(Some(GoodId(2))).unwrap();

        assert_eq!(
            row.orders_loaded(for_a.ticket, Ok(vec![order(10, 5, "1")])),
            None
        );
        assert!(row.options().is_empty());
        assert_eq!(row.order_id(), None);

        row.orders_loaded(for_b.ticket, Ok(vec![order(20, 1, "1"), order(21, 1, "1")]));
        let ids: Vec<_> = row.options().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OrderId(20), OrderId(21)]);
    }

    #[test]
    fn test_late_stock_quote_for_previous_order_is_discarded() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(1))).unwrap();
        row.orders_loaded(request.ticket, Ok(vec![order(10, 5, "1"), order(11, 9, "2")]));

        let first = row.select_order(Some(OrderId(10))).unwrap();
        let second = row.select_order(Some(OrderId(11))).unwrap();

        assert!(!row.stock_loaded(first.ticket, Ok(quote(5, Some("1")))));
        assert_eq!(row.available_stock(), None);
        assert!(row.stock_loaded(second.ticket, Ok(quote(9, Some("2")))));
        assert_eq!(row.available_stock(), Some(9));
    }

    #[test]
    fn test_stock_quote_after_good_change_is_discarded() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(1))).unwrap();
        let stock_for_a = row
            .orders_loaded(request.ticket, Ok(vec![order(10, 5, "3.00")]))
            .unwrap();

        let _for_b = row.select_good(Some(GoodId(2))).unwrap();
        assert!(!row.stock_loaded(stock_for_a.ticket, Ok(quote(5, Some("3.00")))));
        assert_eq!(row.good_id(), Some(GoodId(2)));
        assert_eq!(row.order_id(), None);
        assert_eq!(row.available_stock(), None);
        assert_eq!(row.unit_price(), None);
        assert!(!row.is_loading_stock());
    }

    #[test]
    fn test_clearing_good_discards_pending_lookup() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(1))).unwrap();
        assert_eq!(row.select_good(None), None);
        assert_eq!(row.phase(), RowPhase::Empty);

        assert_eq!(
            row.orders_loaded(request.ticket, Ok(vec![order(10, 5, "1")])),
            None
        );
        assert!(row.options().is_empty());
        assert_eq!(row.orders_status(), OrdersStatus::Idle);
    }

    #[test]
    fn test_failed_stock_lookup_shows_unknown_not_previous_values() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(1))).unwrap();
        row.orders_loaded(request.ticket, Ok(vec![order(10, 5, "1"), order(11, 9, "2")]));

        let first = row.select_order(Some(OrderId(10))).unwrap();
        row.stock_loaded(first.ticket, Ok(quote(5, Some("1"))));
        assert_eq!(row.available_stock(), Some(5));

        let second = row.select_order(Some(OrderId(11))).unwrap();
        row.stock_loaded(second.ticket, Err(CatalogError::Transport("offline".into())));
        assert_eq!(row.available_stock(), None);
        assert_eq!(row.unit_price(), None);
        assert_eq!(row.line_total(), None);
    }

    #[test]
    fn test_failed_order_lookup_allows_retry_of_same_good() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(1))).unwrap();
        row.orders_loaded(request.ticket, Err(CatalogError::Status(500)));
        assert_eq!(row.orders_status(), OrdersStatus::Failed);
        assert!(row.select_good(Some(GoodId(1))).is_some());
    }

    #[test]
    fn test_duplicate_triggers_do_not_refire() {
        let mut row = RowController::new();
        assert!(row.select_good(Some(GoodId(1))).is_some());
        assert!(row.select_good(Some(GoodId(1))).is_none());

        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(1))).unwrap();
        row.orders_loaded(request.ticket, Ok(vec![order(10, 5, "1"), order(11, 9, "2")]));
        assert!(row.select_order(Some(OrderId(10))).is_some());
        assert!(row.select_order(Some(OrderId(10))).is_none());
    }

    #[test]
    fn test_clearing_order_clears_derived_fields() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(1))).unwrap();
        let stock_request = row
            .orders_loaded(request.ticket, Ok(vec![order(10, 5, "4")]))
            .unwrap();
        row.stock_loaded(stock_request.ticket, Ok(quote(5, Some("4"))));
        row.edit_quantity("1");

        assert_eq!(row.select_order(None), None);
        assert_eq!(row.phase(), RowPhase::GoodSelected);
        assert_eq!(row.available_stock(), None);
        assert_eq!(row.unit_price(), None);
        assert_eq!(row.line_total(), None);
    }

    #[test]
    fn test_order_outside_options_is_rejected() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(1))).unwrap();
        row.orders_loaded(request.ticket, Ok(vec![order(10, 5, "1"), order(11, 1, "1")]));
        assert_eq!(row.select_order(Some(OrderId(99))), None);
        assert_eq!(row.order_id(), None);
    }

    #[test]
    fn test_quantity_is_validated_against_stock() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(1))).unwrap();
        let stock_request = row
            .orders_loaded(request.ticket, Ok(vec![order(10, 5, "2.50")]))
            .unwrap();

        row.edit_quantity("6");
        // Stock still loading: no false positive
        assert!(row.validity().is_valid());

        row.stock_loaded(stock_request.ticket, Ok(quote(5, Some("2.50"))));
        assert_eq!(row.validity(), QuantityValidity::ExceedsStock { available: 5 });

        row.edit_quantity("5");
        assert!(row.validity().is_valid());
        assert_eq!(row.line_total(), Some(dec("12.50")));

        row.edit_quantity("4");
        assert!(row.validity().is_valid());
        assert_eq!(row.line_total(), Some(dec("10.00")));
    }

    #[test]
    fn test_line_total_unknown_without_quantity() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(1))).unwrap();
        let stock_request = row
            .orders_loaded(request.ticket, Ok(vec![order(10, 5, "2.50")]))
            .unwrap();
        row.stock_loaded(stock_request.ticket, Ok(quote(5, Some("2.50"))));

        row.edit_quantity("");
        assert_eq!(row.line_total(), None);
        row.edit_quantity("abc");
        assert_eq!(row.line_total(), None);
        assert_eq!(row.quantity_input(), "abc");
    }

    #[test]
    fn test_restored_row_keeps_stored_order() {
        let mut row = RowController::new();
        let request = row
            .restore(Some(GoodId(1)), Some(OrderId(11)), "3")
            .unwrap();
        let stock_request = row
            .orders_loaded(request.ticket, Ok(vec![order(10, 5, "1"), order(11, 9, "2")]))
            .unwrap();
        assert_eq!(stock_request.order_id, OrderId(11));
        assert_eq!(row.quantity(), Some(3));
    }

    #[test]
    fn test_restored_row_with_withdrawn_order_falls_back() {
        let mut row = RowController::new();
        let request = row
            .restore(Some(GoodId(1)), Some(OrderId(99)), "")
            .unwrap();
        let follow_up = row.orders_loaded(request.ticket, Ok(vec![order(10, 5, "1")]));
        assert_eq!(follow_up.map(|r| r.order_id), Some(OrderId(10)));
    }

    #[test]
    fn test_restored_blank_row_issues_nothing() {
        let mut row = RowController::new();
        assert_eq!(row.restore(None, Some(OrderId(1)), "2"), None);
        assert_eq!(row.phase(), RowPhase::Empty);
        assert_eq!(row.quantity(), Some(2));
    }

}
