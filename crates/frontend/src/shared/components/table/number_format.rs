//! Number formatting for table cells

use rust_decimal::{Decimal, RoundingStrategy};

/// Shown in place of any value that is unknown, loading or failed to load
pub const UNKNOWN_MARKER: &str = "-";

/// Formats a decimal with a space as thousands separator
///
/// # Examples
///
/// ```
/// use frontend::shared::components::table::format_number_with_decimals;
/// use rust_decimal::Decimal;
/// assert_eq!(format_number_with_decimals(Decimal::new(1234567, 3), 2), "1 234.57");
/// ```
pub fn format_number_with_decimals(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.prec$}", rounded, prec = decimals as usize);

    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (integer_part, fraction) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let grouped = group_thousands(integer_part);
    match fraction {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Money: two decimals and thousands separator
pub fn format_money(value: Decimal) -> String {
    format_number_with_decimals(value, 2)
}

pub fn format_optional_money(value: Option<Decimal>) -> String {
    value
        .map(format_money)
        .unwrap_or_else(|| UNKNOWN_MARKER.to_string())
}

pub fn format_optional_int(value: Option<i64>) -> String {
    value
        .map(|v| format_number_with_decimals(Decimal::from(v), 0))
        .unwrap_or_else(|| UNKNOWN_MARKER.to_string())
}

/// Machine-readable price for hidden inputs (`1234.50`); empty when unknown
pub fn format_input_decimal(value: Option<Decimal>) -> String {
    value
        .map(|v| {
            let rounded = v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.2}", rounded)
        })
        .unwrap_or_default()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec("1234.56")), "1 234.56");
        assert_eq!(format_money(dec("1234567.89")), "1 234 567.89");
        assert_eq!(format_money(Decimal::ZERO), "0.00");
        assert_eq!(format_money(dec("-1234.56")), "-1 234.56");
        assert_eq!(format_money(dec("12.5")), "12.50");
        assert_eq!(format_money(dec("0.125")), "0.13");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(dec("1234.567"), 0), "1 235");
        assert_eq!(format_number_with_decimals(dec("1234.567"), 1), "1 234.6");
        assert_eq!(format_number_with_decimals(dec("999"), 0), "999");
        assert_eq!(format_number_with_decimals(dec("100000"), 0), "100 000");
    }

    #[test]
    fn test_unknown_values() {
        assert_eq!(format_optional_money(None), UNKNOWN_MARKER);
        assert_eq!(format_optional_int(None), UNKNOWN_MARKER);
        assert_eq!(format_optional_int(Some(1500)), "1 500");
        assert_eq!(format_input_decimal(None), "");
        assert_eq!(format_input_decimal(Some(dec("1234.5"))), "1234.50");
    }
}
