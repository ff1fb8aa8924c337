//! Delivery items form
//!
//! - view_model.rs: row and table ViewModels, commands running the row state machine
//! - view.rs: Leptos components (pure UI)

mod view;
mod view_model;

pub use view::DeliveryDetails;
pub use view_model::{DeliveryFormVm, DeliveryRowVm, RowEvent};
