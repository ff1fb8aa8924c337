use super::view_model::{DeliveryFormVm, DeliveryRowVm, RowEvent};
use crate::domain::a002_purchase_order::api::OrderCatalog;
use crate::shared::components::table::TableCellMoney;
use crate::shared::components::ui::{Button, ButtonVariant, Input, SelectControl};
use crate::shared::components::{ManagementForm, TableTotalsRow};
use crate::shared::config::{FormConfig, PageKind};
use crate::shared::enhanced_select::SelectionEvent;
use crate::shared::page_frame::PageFrame;
use crate::shared::table_container::FormRow;
use leptos::prelude::*;
use thaw::*;

/// Delivery items table: one row per delivered good
#[component]
pub fn DeliveryDetails(config: FormConfig, catalog: OrderCatalog) -> impl IntoView {
    let vm = DeliveryFormVm::new(&config, catalog);
    vm.load_initial(&config);

    let enhanced = vm.enhanced_select;
    let rows = vm.rows();
    let row_count = vm.row_count();
    let grand_total = vm.grand_total();
    let error = vm.error;
    let naming = vm.naming();
    let total_forms = vm.total_forms();
    let initial_forms = vm.initial_forms();
    let vm_add = vm.clone();

    view! {
        <PageFrame kind=PageKind::Delivery>
            <ManagementForm
                naming=naming
                total_forms=total_forms
                initial_forms=initial_forms
            />
            <div class="table-wrapper">
                <Table attr:style="width:100%;" attr:id="items-table">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Bien"</TableHeaderCell>
                            <TableHeaderCell>"Orden de compra"</TableHeaderCell>
                            <TableHeaderCell>"Stock disponible"</TableHeaderCell>
                            <TableHeaderCell>"Precio unitario"</TableHeaderCell>
                            <TableHeaderCell>"Cantidad"</TableHeaderCell>
                            <TableHeaderCell>"Total"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || rows.get()
                            key=|(form, _)| form.index()
                            children=move |(form, row)| {
                                view! { <DeliveryItemRow form=form row=row enhanced=enhanced /> }
                            }
                        />
                        <TableRow class="form-row--control">
                            <td colspan="6">
                                <Button
                                    variant=ButtonVariant::Secondary
                                    on_click=Callback::new(move |_| vm_add.add_row())
                                >
                                    "+ Agregar bien"
                                </Button>
                                {move || error.get().map(|e| view! {
                                    <span class="form__error">{e}</span>
                                })}
                            </td>
                        </TableRow>
                        <TableTotalsRow
                            label=Signal::derive(move || format!("Ítems: {}", row_count.get()))
                            total=grand_total
                            label_colspan=5
                        />
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}

#[component]
fn DeliveryItemRow(form: FormRow, row: DeliveryRowVm, enhanced: bool) -> impl IntoView {
    let on_good = {
        let row = row.clone();
        Callback::new(move |selection: SelectionEvent| row.dispatch(RowEvent::GoodChanged(selection)))
    };
    let on_order = {
        let row = row.clone();
        Callback::new(move |selection: SelectionEvent| row.dispatch(RowEvent::OrderChanged(selection)))
    };
    let on_quantity = {
        let row = row.clone();
        Callback::new(move |raw: String| row.dispatch(RowEvent::QuantityEdited(raw)))
    };
    let stored_id = form.value_of("id").unwrap_or_default().to_string();
    let (id_name, id_id) = (form.name_of("id"), form.id_of("id"));
    let (bien_name, bien_id) = (form.name_of("bien"), form.id_of("bien"));
    let (orden_name, orden_id) = (form.name_of("orden_de_compra"), form.id_of("orden_de_compra"));
    let (precio_name, precio_id) = (form.name_of("precio_unitario"), form.id_of("precio_unitario"));
    let (cantidad_name, cantidad_id) = (form.name_of("cantidad"), form.id_of("cantidad"));

    let good_select = row.good_select;
    let order_select = row.order_select;
    let order_placeholder = row.order_placeholder();
    let busy = row.is_busy();
    let stock_text = row.stock_text();
    let unit_price = row.unit_price();
    let price_input_value = row.price_input_value();
    let quantity_value = row.quantity_value();
    let quantity_error = row.quantity_error();
    let line_total = row.line_total();

    view! {
        <TableRow class="form-row">
            <TableCell>
                <input type="hidden" name=id_name id=id_id value=stored_id />
                <SelectControl
                    handle=good_select
                    enhanced=enhanced
                    on_change=on_good
                    placeholder="Seleccione un bien"
                    name=bien_name
                    id=bien_id
                    class="bien-select"
                />
            </TableCell>
            <TableCell>
                <SelectControl
                    handle=order_select
                    enhanced=enhanced
                    on_change=on_order
                    placeholder=order_placeholder
                    name=orden_name
                    id=orden_id
                    class="orden-select"
                />
            </TableCell>
            <TableCell class="text-right stock-cell">
                <TableCellLayout>
                    {move || if busy.get() {
                        view! { <Spinner size=SpinnerSize::Tiny /> }.into_any()
                    } else {
                        view! { <span>{move || stock_text.get()}</span> }.into_any()
                    }}
                </TableCellLayout>
            </TableCell>
            <TableCellMoney value=unit_price class="precio-unitario-cell" />
            <TableCell>
                <input
                    type="hidden"
                    name=precio_name
                    id=precio_id
                    prop:value=price_input_value
                />
                <Input
                    value=quantity_value
                    on_input=on_quantity
                    name=cantidad_name
                    id=cantidad_id
                    input_type="number"
                    min="0"
                    invalid=quantity_error
                />
            </TableCell>
            <TableCellMoney value=line_total class="precio-total-cell" bold=true />
        </TableRow>
    }
}
