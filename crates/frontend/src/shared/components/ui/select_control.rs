use super::{SearchableSelect, Select};
use crate::shared::enhanced_select::{SelectHandle, SelectionEvent};
use leptos::prelude::*;

/// Renders exactly one selection control for a field: the searchable
/// dropdown when `enhanced` is set, a plain `<select>` otherwise. Both
/// report through the same `on_change`, so a user choice reaches row logic once.
#[component]
pub fn SelectControl(
    handle: SelectHandle,
    enhanced: bool,
    #[prop(into)] on_change: Callback<SelectionEvent>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional, into)] name: MaybeProp<String>,
    #[prop(optional, into)] id: MaybeProp<String>,
    #[prop(optional, into)] class: MaybeProp<String>,
) -> impl IntoView {
    if enhanced {
        view! {
            <SearchableSelect
                handle=handle
                on_change=on_change
                placeholder=placeholder
                name=name
                id=id
                class=class
            />
        }
        .into_any()
    } else {
        view! {
            <Select
                handle=handle
                on_change=on_change
                placeholder=placeholder
                name=name
                id=id
                class=class
            />
        }
        .into_any()
    }
}
