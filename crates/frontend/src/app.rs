use crate::domain::a002_purchase_order::api::OrderCatalog;
use crate::domain::a002_purchase_order::ui::edit::OrderEditDetails;
use crate::domain::a003_delivery::ui::details::DeliveryDetails;
use crate::shared::api_utils::api_base;
use crate::shared::config::{load_config, PageKind};
use leptos::prelude::*;

/// Mounts the form described by the page's configuration block
#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    let catalog = OrderCatalog::new(api_base(&config.api_prefix));
    log::info!("Mounting {:?} form (prefix '{}')", config.page, config.formset_prefix);

    match config.page {
        PageKind::Delivery => view! { <DeliveryDetails config=config catalog=catalog /> }.into_any(),
        PageKind::OrderEdit => {
            view! { <OrderEditDetails config=config catalog=catalog /> }.into_any()
        }
    }
}
