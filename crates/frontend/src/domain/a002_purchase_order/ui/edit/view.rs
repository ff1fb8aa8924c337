use super::view_model::{OrderEditVm, OrderLineVm};
use crate::domain::a002_purchase_order::api::OrderCatalog;
use crate::shared::components::table::TableCellMoney;
use crate::shared::components::ui::{Button, Input, SelectControl};
use crate::shared::components::{ManagementForm, TableTotalsRow};
use crate::shared::config::{FormConfig, PageKind};
use crate::shared::enhanced_select::SelectionEvent;
use crate::shared::page_frame::PageFrame;
use crate::shared::table_container::FormRow;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn OrderEditDetails(config: FormConfig, catalog: OrderCatalog) -> impl IntoView {
    let vm = OrderEditVm::new(&config, catalog);
    vm.load_initial(&config);

    let enhanced = vm.enhanced_select;
    let rows = vm.rows();
    let row_count = vm.row_count();
    let order_total = vm.order_total();
    let loading_goods = vm.is_loading_goods();
    let error = vm.error;
    let order_select = vm.order_select;
    let naming = vm.naming();
    let total_forms = vm.total_forms();
    let initial_forms = vm.initial_forms();

    let on_order = {
        let vm = vm.clone();
        Callback::new(move |selection: SelectionEvent| vm.select_order(selection))
    };
    let vm_add = vm.clone();

    view! {
        <PageFrame kind=PageKind::OrderEdit>
            <Card>
                <Flex gap=FlexGap::Small style="align-items:center;padding:var(--spacing-md);">
                    <label class="form__label" for="id_orden_de_compra">"Orden de compra"</label>
                    <SelectControl
                        handle=order_select
                        enhanced=enhanced
                        on_change=on_order
                        placeholder="Seleccione una orden"
                        name="orden_de_compra"
                        id="id_orden_de_compra"
                    />
                    <Show when=move || loading_goods.get()>
                        <Spinner size=SpinnerSize::Tiny />
                    </Show>
                    {move || error.get().map(|e| view! { <span class="form__error">{e}</span> })}
                </Flex>
            </Card>
            <ManagementForm
                naming=naming
                total_forms=total_forms
                initial_forms=initial_forms
            />
            <div class="table-wrapper">
                <Table attr:style="width:100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Bien"</TableHeaderCell>
                            <TableHeaderCell>"Cantidad"</TableHeaderCell>
                            <TableHeaderCell>"Precio unitario"</TableHeaderCell>
                            <TableHeaderCell>"Precio total"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || rows.get()
                            key=|(form, _)| form.index()
                            children=move |(form, line)| {
                                view! { <OrderLineRow form=form line=line enhanced=enhanced /> }
                            }
                        />
                        <TableRow class="form-row--control">
                            <td colspan="4">
                                <Button on_click=Callback::new(move |_| vm_add.add_row())>
                                    "+ Agregar ítem"
                                </Button>
                            </td>
                        </TableRow>
                        <TableTotalsRow
                            label=Signal::derive(move || format!("Total de la orden ({} ítems)", row_count.get()))
                            total=order_total
                            label_colspan=3
                        />
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}

#[component]
fn OrderLineRow(form: FormRow, line: OrderLineVm, enhanced: bool) -> impl IntoView {
    let on_good = {
        let line = line.clone();
        Callback::new(move |selection: SelectionEvent| line.select_good(selection))
    };
    let on_quantity = {
        let line = line.clone();
        Callback::new(move |raw: String| line.edit_quantity(raw))
    };
    let on_price = {
        let line = line.clone();
        Callback::new(move |raw: String| line.edit_price(raw))
    };
    let stored_id = form.value_of("id").unwrap_or_default().to_string();
    let (id_name, id_id) = (form.name_of("id"), form.id_of("id"));
    let (bien_name, bien_id) = (form.name_of("bien"), form.id_of("bien"));
    let (cantidad_name, cantidad_id) = (form.name_of("cantidad"), form.id_of("cantidad"));
    let (precio_name, precio_id) = (form.name_of("precio_unitario"), form.id_of("precio_unitario"));

    let good_select = line.good_select;
    let quantity_value = line.quantity_value();
    let price_value = line.price_value();
    let line_total = line.line_total();
    let loading_price = line.is_loading_price();

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
                <Input
                    value=quantity_value
                    on_input=on_quantity
                    name=cantidad_name
                    id=cantidad_id
                    input_type="number"
                    min="0"
                />
            </TableCell>
            <TableCell class="precio-unitario-cell">
                <Input
                    value=price_value
                    on_input=on_price
                    name=precio_name
                    id=precio_id
                    input_type="text"
                    placeholder=Signal::derive(move || {
                        Some(if loading_price.get() { "Cargando..." } else { "-" }.to_string())
                    })
                />
            </TableCell>
            <TableCellMoney value=line_total class="precio-total-cell" bold=true />
        </TableRow>
    }
}
