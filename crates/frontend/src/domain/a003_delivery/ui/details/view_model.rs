//! ViewModels for the delivery items form
//!
//! `DeliveryRowVm` wraps one [`RowController`] in a signal and runs the
//! catalog lookups it asks for. `DeliveryFormVm` owns the formset table.

use crate::domain::a002_purchase_order::api::OrderCatalog;
use crate::domain::a003_delivery::row_controller::{
    OrdersRequest, OrdersStatus, RowController, StockRequest,
};
use crate::shared::components::table::{format_input_decimal, format_optional_int};
use crate::shared::components::table_totals_row::sum_known;
use crate::shared::config::{FormConfig, InitialRow};
use crate::shared::enhanced_select::{EnhancedSelect, SelectHandle, SelectOption, SelectionEvent};
use crate::shared::table_container::{FormRow, RowTemplate, TableContainer};
use contracts::domain::a001_good::aggregate::{GoodId, GoodRef};
use contracts::domain::a002_purchase_order::aggregate::{OrderId, OrderOption};
use contracts::domain::common::AggregateId;
use contracts::shared::formset::FormsetNaming;
use leptos::prelude::*;
use rust_decimal::Decimal;

/// Fields of one delivery row, in column order
pub const ROW_FIELDS: &[&str] = &["id", "bien", "orden_de_compra", "cantidad", "precio_unitario"];

const ORDER_PLACEHOLDER: &str = "Seleccione una orden";

pub fn good_options(goods: &[GoodRef]) -> Vec<SelectOption> {
    goods
        .iter()
        .map(|g| SelectOption::new(g.id.as_string(), g.name.clone()))
        .collect()
}

fn order_options(orders: &[OrderOption]) -> Vec<SelectOption> {
    orders
        .iter()
        .map(|o| SelectOption::new(o.id.as_string(), o.display_number.clone()))
        .collect()
}

/// User input on a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    GoodChanged(SelectionEvent),
    OrderChanged(SelectionEvent),
    QuantityEdited(String),
}

/// Lookup a row transition asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLookup {
    Orders(OrdersRequest),
    Stock(StockRequest),
}

/// Parse the control value carried by `event` and run the matching
/// transition. A value that is not a valid id leaves the row untouched.
pub fn apply_event(
    controller: &mut RowController,
    event: RowEvent,
) -> Result<Option<RowLookup>, String> {
    match event {
        RowEvent::GoodChanged(selection) => {
            let good = GoodId::from_control_value(&selection.into_value())?;
            Ok(controller.select_good(good).map(RowLookup::Orders))
        }
        RowEvent::OrderChanged(selection) => {
            let order = OrderId::from_control_value(&selection.into_value())?;
            Ok(controller.select_order(order).map(RowLookup::Stock))
        }
        RowEvent::QuantityEdited(raw) => {
            controller.edit_quantity(&raw);
            Ok(None)
        }
    }
}

/// Start a controller from a server-rendered row.
///
/// Stored ids that do not parse leave the controller blank.
pub fn restore_row(
    controller: &mut RowController,
    initial: &InitialRow,
) -> Result<Option<OrdersRequest>, String> {
    let good = GoodId::from_control_value(initial.bien.as_deref().unwrap_or_default())?;
    let order =
        OrderId::from_control_value(initial.orden_de_compra.as_deref().unwrap_or_default())?;
    Ok(controller.restore(good, order, &initial.cantidad))
}

#[derive(Clone)]
pub struct DeliveryRowVm {
    pub controller: RwSignal<RowController>,
    pub good_select: SelectHandle,
    pub order_select: SelectHandle,
    catalog: OrderCatalog,
}

impl DeliveryRowVm {
    pub fn new(catalog: OrderCatalog, goods: &[GoodRef]) -> Self {
        let good_select = SelectHandle::new();
        good_select.set_options(good_options(goods));
        Self {
            controller: RwSignal::new(RowController::new()),
            good_select,
            order_select: SelectHandle::new(),
            catalog,
        }
    }

    /// Start a server-rendered row from its stored values; other rows keep
    /// working when this one cannot be restored
    pub fn restore(&self, initial: &InitialRow) {
        let restored = self.controller.try_update(|c| restore_row(c, initial));
        self.sync_controls();
        match restored {
            Some(Ok(Some(request))) => self.load_orders(request),
            Some(Err(e)) => log::warn!("Row with invalid stored values left blank: {}", e),
            _ => {}
        }
    }

    /// Single entry point for every control of the row
    pub fn dispatch(&self, event: RowEvent) {
        let applied = self.controller.try_update(|c| apply_event(c, event));
        self.sync_controls();
        match applied {
            Some(Ok(Some(RowLookup::Orders(request)))) => self.load_orders(request),
            Some(Ok(Some(RowLookup::Stock(request)))) => self.load_stock(request),
            Some(Err(e)) => log::warn!("{}", e),
            _ => {}
        }
    }

    fn load_orders(&self, request: OrdersRequest) {
        let this = self.clone();
        leptos::task::spawn_local(async move {
            let result = this.catalog.fetch_orders_with_stock(request.good_id).await;
            let next = this
                .controller
                .try_update(|c| c.orders_loaded(request.ticket, result))
                .flatten();
            this.sync_controls();
            if let Some(stock_request) = next {
                this.load_stock(stock_request);
            }
        });
    }

    fn load_stock(&self, request: StockRequest) {
        let this = self.clone();
        leptos::task::spawn_local(async move {
            let result = this
                .catalog
                .fetch_stock_quote(request.order_id, request.good_id)
                .await;
            this.controller
                .update(|c| _ = c.stock_loaded(request.ticket, result));
        });
    }

    /// Push the controller's selection into both select controls
    fn sync_controls(&self) {
        let (good, order, options) = self.controller.with_untracked(|c| {
            (c.good_id(), c.order_id(), order_options(c.options()))
        });
        self.order_select.set_options(options);
        self.order_select.set_value(order.map(|id| id.as_string()));
        self.good_select.set_value(good.map(|id| id.as_string()));
    }

    // === Derived signals ===

    pub fn stock_text(&self) -> Signal<String> {
        let controller = self.controller;
        Signal::derive(move || controller.with(|c| format_optional_int(c.available_stock())))
    }

    pub fn unit_price(&self) -> Signal<Option<Decimal>> {
        let controller = self.controller;
        Signal::derive(move || controller.with(|c| c.unit_price()))
    }

    /// Value of the hidden `precio_unitario` input
    pub fn price_input_value(&self) -> Signal<String> {
        let controller = self.controller;
        Signal::derive(move || controller.with(|c| format_input_decimal(c.unit_price())))
    }

    pub fn line_total(&self) -> Signal<Option<Decimal>> {
        let controller = self.controller;
        Signal::derive(move || controller.with(|c| c.line_total()))
    }

    pub fn quantity_value(&self) -> Signal<String> {
        let controller = self.controller;
        Signal::derive(move || controller.with(|c| c.quantity_input().to_string()))
    }

    pub fn quantity_error(&self) -> Signal<Option<String>> {
        let controller = self.controller;
        Signal::derive(move || controller.with(|c| c.validity().message()))
    }

    pub fn order_placeholder(&self) -> Signal<Option<String>> {
        let controller = self.controller;
        Signal::derive(move || {
            let text = controller.with(|c| match c.orders_status() {
                OrdersStatus::Loading => "Cargando órdenes...".to_string(),
                OrdersStatus::Loaded if c.options().is_empty() => {
                    "Sin órdenes con stock".to_string()
                }
                OrdersStatus::Failed => "Error al cargar órdenes".to_string(),
                _ => ORDER_PLACEHOLDER.to_string(),
            });
            Some(text)
        })
    }

    pub fn is_busy(&self) -> Signal<bool> {
        let controller = self.controller;
        Signal::derive(move || {
            controller.with(|c| c.orders_status() == OrdersStatus::Loading || c.is_loading_stock())
        })
    }
}

/// ViewModel for the whole delivery items table
#[derive(Clone)]
pub struct DeliveryFormVm {
    pub container: RwSignal<TableContainer<DeliveryRowVm>>,
    pub enhanced_select: bool,
    pub error: RwSignal<Option<String>>,
    catalog: OrderCatalog,
    goods: Vec<GoodRef>,
}

impl DeliveryFormVm {
    pub fn new(config: &FormConfig, catalog: OrderCatalog) -> Self {
        let naming = FormsetNaming::new(config.formset_prefix.clone());
        let template = RowTemplate::for_fields(&naming, ROW_FIELDS);
        let container = TableContainer::new(naming, Some(template)).with_control_row();

        Self {
            container: RwSignal::new(container),
            enhanced_select: config.enhanced_select,
            error: RwSignal::new(None),
            catalog,
            goods: config.goods.clone(),
        }
    }

    /// Add the server-rendered rows and start their lookups
    pub fn load_initial(&self, config: &FormConfig) {
        let mut restored = Vec::with_capacity(config.initial_rows.len());
        self.container.update(|container| {
            for (index, initial) in config.initial_rows.iter().enumerate() {
                let values = [
                    ("id", initial.id.clone().unwrap_or_default()),
                    ("bien", initial.bien.clone().unwrap_or_default()),
                    (
                        "orden_de_compra",
                        initial.orden_de_compra.clone().unwrap_or_default(),
                    ),
                    ("cantidad", initial.cantidad.clone()),
                    ("precio_unitario", initial.precio_unitario.clone()),
                ];
                let form = FormRow::prefilled(container.naming(), index, ROW_FIELDS, &values);
                let row = DeliveryRowVm::new(self.catalog.clone(), &self.goods);
                match container.push_initial(form, row.clone()) {
                    Ok(_) => restored.push((row, initial.clone())),
                    Err(e) => log::warn!("Skipping initial row {}: {}", index, e),
                }
            }
            container.set_initial_count(config.initial_form_count());
        });

        // Lookups start once the container is no longer borrowed
        for (row, initial) in restored {
            row.restore(&initial);
        }
    }

    /// "Agregar bien": append a blank, fully wired row
    pub fn add_row(&self) {
        let catalog = self.catalog.clone();
        let goods = self.goods.clone();
        let result = self
            .container
            .try_update(|c| c.append(|_| DeliveryRowVm::new(catalog, &goods)));
        match result {
            Some(Ok(index)) => {
                log::debug!("Added delivery row {}", index);
                self.error.set(None);
            }
            Some(Err(e)) => {
                log::error!("Cannot add row: {}", e);
                self.error.set(Some(e));
            }
            None => {}
        }
    }

    /// Rows paired with their naming, in display order
    pub fn rows(&self) -> Signal<Vec<(FormRow, DeliveryRowVm)>> {
        let container = self.container;
        Signal::derive(move || {
            container.with(|c| c.rows().map(|(f, r)| (f.clone(), r.clone())).collect())
        })
    }

    pub fn row_count(&self) -> Signal<usize> {
        let container = self.container;
        Signal::derive(move || container.with(|c| c.len()))
    }

    /// Sum of the known line totals
    pub fn grand_total(&self) -> Signal<Option<Decimal>> {
        let container = self.container;
        Signal::derive(move || {
            let totals: Vec<Option<Decimal>> = container.with(|c| {
                c.rows()
                    .map(|(_, row)| row.controller.with(|ctl| ctl.line_total()))
                    .collect()
            });
            sum_known(&totals)
        })
    }

    pub fn total_forms(&self) -> Signal<String> {
        let container = self.container;
        Signal::derive(move || container.with(|c| c.total_count().to_string()))
    }

    pub fn initial_forms(&self) -> Signal<String> {
        let container = self.container;
        Signal::derive(move || container.with(|c| c.initial_count().to_string()))
    }

    pub fn naming(&self) -> FormsetNaming {
        self.container.with_untracked(|c| c.naming().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_delivery::row_controller::RowPhase;

    fn initial(bien: &str, orden: &str, cantidad: &str) -> InitialRow {
        InitialRow {
            id: Some("1".into()),
            bien: Some(bien.into()),
            orden_de_compra: Some(orden.into()),
            cantidad: cantidad.into(),
            precio_unitario: String::new(),
        }
    }

    #[test]
    fn test_malformed_stored_id_leaves_row_blank() {
        let mut broken = RowController::new();
        assert!(restore_row(&mut broken, &initial("abc", "10", "3")).is_err());
        assert_eq!(broken.phase(), RowPhase::Empty);
        assert_eq!(broken.good_id(), None);
        assert_eq!(broken.quantity(), None);

        let mut intact = RowController::new();
        let request = restore_row(&mut intact, &initial("4", "10", "3")).unwrap().unwrap();
        assert_eq!(request.good_id, GoodId(4));
        assert_eq!(intact.quantity(), Some(3));
    }

    #[test]
    fn test_malformed_stored_order_leaves_row_blank() {
        let mut row = RowController::new();
        assert!(restore_row(&mut row, &initial("4", "OC-1", "")).is_err());
        assert_eq!(row.phase(), RowPhase::Empty);
    }

    #[test]
    fn test_apply_event_routes_to_transitions() {
        let mut row = RowController::new();
        let lookup = apply_event(
            &mut row,
            RowEvent::GoodChanged(SelectionEvent::Selected("3".into())),
        )
        .unwrap();
        let request = match lookup {
            Some(RowLookup::Orders(request)) => request,
            other => panic!("expected an order lookup, got {:?}", other),
        };
        assert_eq!(request.good_id, GoodId(3));

        row.orders_loaded(
            request.ticket,
            Ok(vec![OrderOption::new(10, "OC #10", 5), OrderOption::new(11, "OC #11", 2)]),
        );
        let lookup = apply_event(
            &mut row,
            RowEvent::OrderChanged(SelectionEvent::Selected("11".into())),
        )
        .unwrap();
        assert!(matches!(lookup, Some(RowLookup::Stock(r)) if r.order_id == OrderId(11)));

        assert_eq!(apply_event(&mut row, RowEvent::QuantityEdited("2".into())), Ok(None));
        assert_eq!(row.quantity(), Some(2));
    }

    #[test]
    fn test_unparsable_control_value_leaves_row_untouched() {
        let mut row = RowController::new();
        let request = row.select_good(Some(GoodId(3))).unwrap();
        row.orders_loaded(request.ticket, Ok(vec![OrderOption::new(10, "OC #10", 5)]));

        let result = apply_event(
            &mut row,
            RowEvent::GoodChanged(SelectionEvent::Selected("x7".into())),
        );
        assert!(result.is_err());
        assert_eq!(row.good_id(), Some(GoodId(3)));
        assert_eq!(row.order_id(), Some(OrderId(10)));
    }

    #[test]
    fn test_cleared_good_resets_row() {
        let mut row = RowController::new();
        row.select_good(Some(GoodId(3)));
        assert_eq!(
            apply_event(&mut row, RowEvent::GoodChanged(SelectionEvent::Cleared)),
            Ok(None)
        );
        assert_eq!(row.phase(), RowPhase::Empty);
    }

    #[test]
    fn test_select_options() {
        let goods = vec![GoodRef::new(1, "RESMA A4")];
        assert_eq!(good_options(&goods), vec![SelectOption::new("1", "RESMA A4")]);

        let orders = vec![OrderOption::new(10, "OC #10", 5)];
        assert_eq!(order_options(&orders), vec![SelectOption::new("10", "OC #10")]);
    }
}
