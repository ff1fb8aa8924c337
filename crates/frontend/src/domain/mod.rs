pub mod a002_purchase_order;
pub mod a003_delivery;
