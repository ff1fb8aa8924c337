use leptos::prelude::*;

/// Form input bound to a string signal; shows an inline message while `invalid` holds one
#[component]
pub fn Input(
    /// Input value
    #[prop(into)]
    value: Signal<String>,
    /// Input event handler
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    /// Form field name, e.g. `items-0-cantidad`
    #[prop(optional, into)]
    name: MaybeProp<String>,
    /// ID for the input element
    #[prop(optional, into)]
    id: MaybeProp<String>,
    /// Input type: "text" (default), "number", "hidden", etc.
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    /// Validation message; `None` means valid
    #[prop(optional, into)]
    invalid: MaybeProp<String>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// Minimum for numeric inputs
    #[prop(optional, into)]
    min: MaybeProp<String>,
) -> impl IntoView {
    let input_id = move || id.get().unwrap_or_default();
    let input_name = move || name.get().unwrap_or_default();
    let input_placeholder = move || placeholder.get().unwrap_or_default();
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());
    let input_min = move || min.get();
    let is_invalid = move || invalid.get().is_some();

    view! {
        <div class="form__group">
            <input
                id=input_id
                name=input_name
                class=move || {
                    let state = if is_invalid() { " is-invalid" } else { "" };
                    format!("form__input{}", state)
                }
                type=input_t
                prop:value=move || value.get()
                placeholder=input_placeholder
                min=input_min
                aria-invalid=move || if is_invalid() { "true" } else { "false" }
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
            />
            {move || invalid.get().map(|message| view! {
                <div class="invalid-feedback">{message}</div>
            })}
        </div>
    }
}
