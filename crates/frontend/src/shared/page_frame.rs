//! Root wrapper of a mounted form.
//!
//! Sets `id="{entity}--form"` and `data-page` on the root element so the
//! server template and stylesheets can target each form.

use super::config::PageKind;
use leptos::prelude::*;

pub fn page_id(kind: PageKind) -> &'static str {
    match kind {
        PageKind::Delivery => "a003_delivery--form",
        PageKind::OrderEdit => "a002_purchase_order--form",
    }
}

fn page_attr(kind: PageKind) -> &'static str {
    match kind {
        PageKind::Delivery => "delivery",
        PageKind::OrderEdit => "order_edit",
    }
}

#[component]
pub fn PageFrame(
    kind: PageKind,
    /// Additional CSS classes appended after the base class
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let full_class = if class.is_empty() {
        "page page--form".to_string()
    } else {
        format!("page page--form {class}")
    };

    view! {
        <div id=page_id(kind) class=full_class data-page=page_attr(kind)>
            {children()}
        </div>
    }
}
