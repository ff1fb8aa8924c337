//! Quantity vs. displayed stock

/// Outcome of checking a delivered quantity against the available stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantityValidity {
    #[default]
    Valid,
    ExceedsStock { available: i64 },
}

impl QuantityValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, QuantityValidity::Valid)
    }

    /// Message shown under the quantity input
    pub fn message(&self) -> Option<String> {
        match self {
            QuantityValidity::Valid => None,
            QuantityValidity::ExceedsStock { available } => Some(format!(
                "La cantidad excede el stock disponible ({})",
                available
            )),
        }
    }
}

/// Unknown stock never flags the quantity, so nothing is reported while data loads.
pub fn validate_quantity(quantity: Option<u64>, available_stock: Option<i64>) -> QuantityValidity {
    match (quantity, available_stock) {
        (Some(quantity), Some(available)) if available >= 0 && quantity > available as u64 => {
            QuantityValidity::ExceedsStock { available }
        }
        _ => QuantityValidity::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_above_stock_is_invalid() {
        let validity = validate_quantity(Some(6), Some(5));
        assert_eq!(validity, QuantityValidity::ExceedsStock { available: 5 });
        assert!(!validity.is_valid());
        assert!(validity.message().unwrap().contains("(5)"));
    }

    #[test]
    fn test_quantity_within_stock_is_valid() {
        assert_eq!(validate_quantity(Some(5), Some(5)), QuantityValidity::Valid);
        assert_eq!(validate_quantity(Some(4), Some(5)), QuantityValidity::Valid);
        assert_eq!(validate_quantity(Some(0), Some(0)), QuantityValidity::Valid);
    }

    #[test]
    fn test_unknown_stock_is_always_valid() {
        assert_eq!(validate_quantity(Some(1_000), None), QuantityValidity::Valid);
        assert_eq!(validate_quantity(None, None), QuantityValidity::Valid);
        assert_eq!(QuantityValidity::Valid.message(), None);
    }

    #[test]
    fn test_negative_stock_is_not_enforced() {
        assert_eq!(validate_quantity(Some(3), Some(-2)), QuantityValidity::Valid);
    }
}
