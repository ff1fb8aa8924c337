//! Table cell for money values
//!
//! ```rust,ignore
//! <TableCellMoney value=unit_price />
//! <TableCellMoney value=line_total bold=true />
//! ```

use super::number_format::format_optional_money;
use leptos::prelude::*;
use rust_decimal::Decimal;
use thaw::*;

/// Right-aligned money cell; unknown values render as the unknown marker
#[component]
pub fn TableCellMoney(
    #[prop(into)] value: Signal<Option<Decimal>>,
    /// Extra CSS class on the cell, e.g. `precio-unitario-cell`
    #[prop(optional)]
    class: &'static str,
    #[prop(optional, default = false)] bold: bool,
) -> impl IntoView {
    let cell_class = if class.is_empty() {
        "text-right".to_string()
    } else {
        format!("text-right {}", class)
    };
    let style = if bold { "font-weight: 600" } else { "" };

    view! {
        <TableCell class=cell_class>
            <span style=style>
                {move || format_optional_money(value.get())}
            </span>
        </TableCell>
    }
}
