use crate::shared::enhanced_select::{SelectHandle, SelectionEvent};
use leptos::prelude::*;

/// Plain `<select>` bound to a [`SelectHandle`], with a leading placeholder option
#[component]
pub fn Select(
    handle: SelectHandle,
    /// Change event handler
    #[prop(into)]
    on_change: Callback<SelectionEvent>,
    /// Text of the empty option
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// Form field name, e.g. `items-0-bien`
    #[prop(optional, into)]
    name: MaybeProp<String>,
    /// ID for the select element
    #[prop(optional, into)]
    id: MaybeProp<String>,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let options = handle.options_signal();
    let value = handle.value_signal();
    let select_id = move || id.get().unwrap_or_default();
    let select_name = move || name.get().unwrap_or_default();
    let placeholder_text = move || placeholder.get().unwrap_or_else(|| "---------".to_string());
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <select
            id=select_id
            name=select_name
            class=move || format!("form__select {}", additional_class())
            prop:value=move || value.get()
            on:change=move |ev| {
                on_change.run(SelectionEvent::from_control_value(event_target_value(&ev)));
            }
        >
            <option value="" selected=move || value.get().is_empty()>
                {placeholder_text}
            </option>
            <For
                each=move || options.get()
                key=|opt| opt.value.clone()
                children=move |opt| {
                    let val_clone = opt.value.clone();
                    let is_selected = move || value.get() == val_clone;
                    view! {
                        <option value=opt.value selected=is_selected>
                            {opt.label}
                        </option>
                    }
                }
            />
        </select>
    }
}
