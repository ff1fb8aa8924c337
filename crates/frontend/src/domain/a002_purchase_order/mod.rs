//! Purchase orders: catalog lookups and the order-edit line totals

pub mod api;
pub mod order_line;
pub mod order_scope;
pub mod ui;
