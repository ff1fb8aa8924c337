use super::table::number_format::format_optional_money;
use leptos::prelude::*;
use rust_decimal::Decimal;

/// Footer row of an item table: a label spanning the leading columns and
/// the money total right-aligned in the next one.
///
/// ```rust,ignore
/// <TableTotalsRow
///     label=Signal::derive(move || format!("Ítems: {}", vm.row_count()))
///     total=Signal::derive(move || vm.grand_total())
///     label_colspan=6
/// />
/// ```
#[component]
pub fn TableTotalsRow(
    #[prop(into)] label: Signal<String>,
    #[prop(into)] total: Signal<Option<Decimal>>,
    /// Columns covered by the label cell
    label_colspan: u32,
) -> impl IntoView {
    view! {
        <tr class="table__totals-row">
            <td colspan=label_colspan>
                <strong>{move || label.get()}</strong>
            </td>
            <td class="text-right">
                <strong>{move || format_optional_money(total.get())}</strong>
            </td>
        </tr>
    }
}

/// Sum of the known values; `None` when no value is known
pub fn sum_known(values: &[Option<Decimal>]) -> Option<Decimal> {
    values
        .iter()
        .flatten()
        .fold(None, |acc, v| Some(acc.unwrap_or(Decimal::ZERO) + v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_sum_known_skips_unknown_totals() {
        assert_eq!(sum_known(&[]), None);
        assert_eq!(sum_known(&[None, None]), None);
        assert_eq!(
            sum_known(&[Some(dec("10.50")), None, Some(dec("2"))]),
            Some(dec("12.50"))
        );
    }
}
