pub mod button;
pub mod input;
pub mod searchable_select;
pub mod select;
pub mod select_control;

pub use button::{Button, ButtonVariant};
pub use input::Input;
pub use searchable_select::SearchableSelect;
pub use select::Select;
pub use select_control::SelectControl;
