pub mod api_utils;
pub mod components;
pub mod config;
pub mod enhanced_select;
pub mod page_frame;
pub mod quantity;
pub mod request_ticket;
pub mod table_container;
