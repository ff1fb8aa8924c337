//! ViewModels for the purchase order edit view
//!
//! The header order scopes the goods of every line; each line keeps its own
//! price lookup.

use crate::domain::a002_purchase_order::api::OrderCatalog;
use crate::domain::a002_purchase_order::order_line::{OrderLineController, PriceRequest};
use crate::domain::a002_purchase_order::order_scope::{GoodsRequest, OrderScope};
use crate::shared::components::table_totals_row::sum_known;
use crate::shared::config::{FormConfig, InitialRow};
use crate::shared::enhanced_select::{EnhancedSelect, SelectHandle, SelectOption, SelectionEvent};
use crate::shared::table_container::{FormRow, RowTemplate, TableContainer};
use contracts::domain::a001_good::aggregate::{GoodId, GoodRef};
use contracts::domain::a002_purchase_order::aggregate::{OrderId, OrderRef};
use contracts::domain::common::AggregateId;
use contracts::shared::formset::FormsetNaming;
use leptos::prelude::*;
use rust_decimal::Decimal;

pub const LINE_FIELDS: &[&str] = &["id", "bien", "cantidad", "precio_unitario"];

fn good_options(goods: &[GoodRef]) -> Vec<SelectOption> {
    goods
        .iter()
        .map(|g| SelectOption::new(g.id.as_string(), g.name.clone()))
        .collect()
}

fn order_options(orders: &[OrderRef]) -> Vec<SelectOption> {
    orders
        .iter()
        .map(|o| SelectOption::new(o.id.as_string(), o.display_number.clone()))
        .collect()
}

#[derive(Clone)]
pub struct OrderLineVm {
    pub controller: RwSignal<OrderLineController>,
    pub good_select: SelectHandle,
    catalog: OrderCatalog,
}

impl OrderLineVm {
    pub fn new(catalog: OrderCatalog, goods: &[GoodRef]) -> Self {
        let good_select = SelectHandle::new();
        good_select.set_options(good_options(goods));
        Self {
            controller: RwSignal::new(OrderLineController::new()),
            good_select,
            catalog,
        }
    }

    pub fn restore(&self, initial: &InitialRow) {
        let good = match GoodId::from_control_value(initial.bien.as_deref().unwrap_or_default()) {
            Ok(good) => good,
            Err(e) => {
                log::warn!("Line with invalid stored good left blank: {}", e);
                return;
            }
        };
        self.controller
            .update(|c| c.restore(good, &initial.cantidad, &initial.precio_unitario));
        self.sync_good();
    }

    pub fn select_good(&self, selection: SelectionEvent) {
        let good = match GoodId::from_control_value(&selection.into_value()) {
            Ok(good) => good,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };
        let request = self.controller.try_update(|c| c.select_good(good)).flatten();
        self.sync_good();
        if let Some(request) = request {
            self.load_price(request);
        }
    }

    pub fn edit_price(&self, raw: String) {
        self.controller.update(|c| c.edit_price(&raw));
    }

    pub fn edit_quantity(&self, raw: String) {
        self.controller.update(|c| c.edit_quantity(&raw));
    }

    /// Switch this line to the goods of the header order
    pub fn apply_goods(&self, order_id: OrderId, goods: Vec<GoodRef>) {
        self.good_select.set_options(good_options(&goods));
        let request = self
            .controller
            .try_update(|c| c.replace_goods(order_id, goods))
            .flatten();
        self.sync_good();
        if let Some(request) = request {
            self.load_price(request);
        }
    }

    pub fn scope_to(&self, order_id: Option<OrderId>) {
        self.controller.update(|c| c.scope_to(order_id));
    }

    /// Back to the unrestricted good list
    pub fn clear_scope(&self, goods: &[GoodRef]) {
        self.controller.update(|c| c.clear_scope());
        self.good_select.set_options(good_options(goods));
        self.sync_good();
    }

    fn load_price(&self, request: PriceRequest) {
        let this = self.clone();
        leptos::task::spawn_local(async move {
            let result = this
                .catalog
                .fetch_order_price(request.order_id, request.good_id)
                .await;
            this.controller
                .update(|c| _ = c.price_loaded(request.ticket, result));
        });
    }

    fn sync_good(&self) {
        let good = self.controller.with_untracked(|c| c.good_id());
        self.good_select.set_value(good.map(|id| id.as_string()));
    }

    // === Derived signals ===

    pub fn price_value(&self) -> Signal<String> {
        let controller = self.controller;
        Signal::derive(move || controller.with(|c| c.price_input().to_string()))
    }

    pub fn quantity_value(&self) -> Signal<String> {
        let controller = self.controller;
        Signal::derive(move || controller.with(|c| c.quantity_input().to_string()))
    }

    pub fn line_total(&self) -> Signal<Option<Decimal>> {
        let controller = self.controller;
        Signal::derive(move || controller.with(|c| c.line_total()))
    }

    pub fn is_loading_price(&self) -> Signal<bool> {
        let controller = self.controller;
        Signal::derive(move || controller.with(|c| c.is_loading_price()))
    }
}

#[derive(Clone)]
pub struct OrderEditVm {
    pub container: RwSignal<TableContainer<OrderLineVm>>,
    pub scope: RwSignal<OrderScope>,
    pub order_select: SelectHandle,
    pub enhanced_select: bool,
    pub error: RwSignal<Option<String>>,
    catalog: OrderCatalog,
    goods: Vec<GoodRef>,
}

impl OrderEditVm {
    pub fn new(config: &FormConfig, catalog: OrderCatalog) -> Self {
        let naming = FormsetNaming::new(config.formset_prefix.clone());
        let template = RowTemplate::for_fields(&naming, LINE_FIELDS);
        let order_select = SelectHandle::new();
        order_select.set_options(order_options(&config.orders));
        order_select.set_value(config.order_id.map(|id| id.as_string()));

        Self {
            container: RwSignal::new(TableContainer::new(naming, Some(template)).with_control_row()),
            scope: RwSignal::new(OrderScope::starting_at(config.order_id)),
            order_select,
            enhanced_select: config.enhanced_select,
            error: RwSignal::new(None),
            catalog,
            goods: config.goods.clone(),
        }
    }

    /// Add the server-rendered lines; their stored prices are kept
    pub fn load_initial(&self, config: &FormConfig) {
        let mut restored = Vec::with_capacity(config.initial_rows.len());
        self.container.update(|container| {
            for (index, initial) in config.initial_rows.iter().enumerate() {
                let values = [
                    ("id", initial.id.clone().unwrap_or_default()),
                    ("bien", initial.bien.clone().unwrap_or_default()),
                    ("cantidad", initial.cantidad.clone()),
                    ("precio_unitario", initial.precio_unitario.clone()),
                ];
                let form = FormRow::prefilled(container.naming(), index, LINE_FIELDS, &values);
                let line = OrderLineVm::new(self.catalog.clone(), &self.goods);
                match container.push_initial(form, line.clone()) {
                    Ok(_) => restored.push((line, initial.clone())),
                    Err(e) => log::warn!("Skipping initial line {}: {}", index, e),
                }
            }
            container.set_initial_count(config.initial_form_count());
        });

        for (line, initial) in restored {
            line.restore(&initial);
            line.scope_to(config.order_id);
        }
    }

    /// Header order changed
    pub fn select_order(&self, selection: SelectionEvent) {
        let order = match OrderId::from_control_value(&selection.into_value()) {
            Ok(order) => order,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };
        self.order_select.set_value(order.map(|id| id.as_string()));
        let request = self.scope.try_update(|s| s.select_order(order)).flatten();

        match (order, request) {
            (None, _) => {
                self.error.set(None);
                let goods = self.goods.clone();
                self.container
                    .with_untracked(|c| c.rows().for_each(|(_, line)| line.clear_scope(&goods)));
            }
            (Some(_), Some(request)) => self.load_goods(request),
            (Some(_), None) => {}
        }
    }

    fn load_goods(&self, request: GoodsRequest) {
        let this = self.clone();
        leptos::task::spawn_local(async move {
            let result = this.catalog.fetch_order_goods(request.order_id).await;
            let applied = this
                .scope
                .try_update(|s| s.goods_loaded(request.ticket, result))
                .flatten();
            match applied {
                Some(goods) => {
                    this.error.set(None);
                    this.container.with_untracked(|c| {
                        c.rows()
                            .for_each(|(_, line)| line.apply_goods(request.order_id, goods.clone()))
                    });
                }
                None if this.scope.with_untracked(|s| s.order_id()) == Some(request.order_id)
                    && !this.scope.with_untracked(|s| s.is_loading()) =>
                {
                    this.error
                        .set(Some("No se pudieron cargar los bienes de la orden".to_string()));
                }
                None => {}
            }
        });
    }

    pub fn add_row(&self) {
        let catalog = self.catalog.clone();
        let (order, scoped_goods) = self
            .scope
            .with_untracked(|s| (s.order_id(), s.goods().map(|g| g.to_vec())));
        let goods = scoped_goods.clone().unwrap_or_else(|| self.goods.clone());

        let result = self
            .container
            .try_update(|c| c.append(|_| OrderLineVm::new(catalog, &goods)));
        match result {
            Some(Ok(index)) => {
                log::debug!("Added order line {}", index);
                let line = self
                    .container
                    .with_untracked(|c| c.rows().last().map(|(_, l)| l.clone()));
                match (line, order, scoped_goods) {
                    (Some(line), Some(order), Some(scoped)) => line.apply_goods(order, scoped),
                    (Some(line), order, None) => line.scope_to(order),
                    _ => {}
                }
            }
            Some(Err(e)) => {
                log::error!("Cannot add line: {}", e);
                self.error.set(Some(e));
            }
            None => {}
        }
    }

    pub fn rows(&self) -> Signal<Vec<(FormRow, OrderLineVm)>> {
        let container = self.container;
        Signal::derive(move || {
            container.with(|c| c.rows().map(|(f, l)| (f.clone(), l.clone())).collect())
        })
    }

    pub fn row_count(&self) -> Signal<usize> {
        let container = self.container;
        Signal::derive(move || container.with(|c| c.len()))
    }

    pub fn order_total(&self) -> Signal<Option<Decimal>> {
        let container = self.container;
        Signal::derive(move || {
            let totals: Vec<Option<Decimal>> = container.with(|c| {
                c.rows()
                    .map(|(_, line)| line.controller.with(|ctl| ctl.line_total()))
                    .collect()
            });
            sum_known(&totals)
        })
    }

    pub fn is_loading_goods(&self) -> Signal<bool> {
        let scope = self.scope;
        Signal::derive(move || scope.with(|s| s.is_loading()))
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
