//! Purchase order edit view: lines with editable price and line totals,
//! goods scoped by the header order.

mod view;
mod view_model;

pub use view::OrderEditDetails;
pub use view_model::{OrderEditVm, OrderLineVm};
