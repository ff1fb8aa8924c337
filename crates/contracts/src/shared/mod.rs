pub mod error;
pub mod formset;
pub mod serde_decimal;
