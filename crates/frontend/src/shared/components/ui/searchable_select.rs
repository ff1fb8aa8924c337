use crate::shared::enhanced_select::{filter_options, SelectHandle, SelectionEvent};
use leptos::prelude::*;

/// Searchable dropdown over a [`SelectHandle`].
///
/// The submitted value travels in a hidden input carrying `name`, so the
/// form posts the same field a plain `<select>` would.
#[component]
pub fn SearchableSelect(
    handle: SelectHandle,
    #[prop(into)] on_change: Callback<SelectionEvent>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional, into)] name: MaybeProp<String>,
    #[prop(optional, into)] id: MaybeProp<String>,
    #[prop(optional, into)] class: MaybeProp<String>,
) -> impl IntoView {
    let options = handle.options_signal();
    let value = handle.value_signal();
    let selected_label = handle.selected_label();

    let query = RwSignal::new(String::new());
    let open = RwSignal::new(false);

    let filtered = Signal::derive(move || options.with(|opts| filter_options(opts, &query.get())));
    let placeholder_text = move || placeholder.get().unwrap_or_else(|| "Buscar...".to_string());
    let additional_class = move || class.get().unwrap_or_default();

    let choose = move |picked: String| {
        query.set(String::new());
        open.set(false);
        on_change.run(SelectionEvent::Selected(picked));
    };

    let clear = move |_: leptos::ev::MouseEvent| {
        query.set(String::new());
        open.set(false);
        on_change.run(SelectionEvent::Cleared);
    };

    view! {
        <div class=move || format!("searchable-select {}", additional_class())>
            <input
                type="hidden"
                id=move || id.get().unwrap_or_default()
                name=move || name.get().unwrap_or_default()
                prop:value=move || value.get()
            />
            <div class="searchable-select__control">
                <input
                    type="text"
                    class="form__input searchable-select__search"
                    autocomplete="off"
                    placeholder=move || selected_label.get().unwrap_or_else(placeholder_text)
                    prop:value=move || query.get()
                    on:focus=move |_| open.set(true)
                    on:blur=move |_| open.set(false)
                    on:input=move |ev| {
                        query.set(event_target_value(&ev));
                        open.set(true);
                    }
                />
                <Show when=move || !value.get().is_empty()>
                    <button
                        type="button"
                        class="searchable-select__clear"
                        title="Quitar selección"
                        on:click=clear
                    >
                        "×"
                    </button>
                </Show>
            </div>
            <Show when=move || open.get()>
                <ul class="searchable-select__menu">
                    {move || {
                        let items = filtered.get();
                        if items.is_empty() {
                            view! {
                                <li class="searchable-select__empty">"Sin resultados"</li>
                            }
                            .into_any()
                        } else {
                            items
                                .into_iter()
                                .map(|opt| {
                                    let picked = opt.value.clone();
                                    let is_current = opt.value == value.get_untracked();
                                    view! {
                                        <li
                                            class=if is_current {
                                                "searchable-select__option is-selected"
                                            } else {
                                                "searchable-select__option"
                                            }
                                            on:mousedown=move |ev| {
                                                ev.prevent_default();
                                                choose(picked.clone());
                                            }
                                        >
                                            {opt.label}
                                        </li>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </ul>
            </Show>
        </div>
    }
}
