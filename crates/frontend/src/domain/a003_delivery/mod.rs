//! Delivery (remito) item rows: good → order → stock/price synchronization

pub mod row_controller;
pub mod ui;
pub mod validation;
