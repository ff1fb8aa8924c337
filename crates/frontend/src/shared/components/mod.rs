pub mod management_form;
pub mod table;
pub mod table_totals_row;
pub mod ui;

pub use management_form::ManagementForm;
pub use table_totals_row::TableTotalsRow;
