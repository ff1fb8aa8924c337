pub mod a001_good;
pub mod a002_purchase_order;
pub mod common;
