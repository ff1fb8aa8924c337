use contracts::shared::formset::FormsetNaming;
use leptos::prelude::*;

/// Hidden `TOTAL_FORMS` / `INITIAL_FORMS` inputs read by the server on submit
#[component]
pub fn ManagementForm(
    naming: FormsetNaming,
    #[prop(into)] total_forms: Signal<String>,
    #[prop(into)] initial_forms: Signal<String>,
) -> impl IntoView {
    view! {
        <input
            type="hidden"
            name=naming.total_forms_name()
            id=naming.total_forms_id()
            prop:value=move || total_forms.get()
        />
        <input
            type="hidden"
            name=naming.initial_forms_name()
            id=naming.initial_forms_id()
            prop:value=move || initial_forms.get()
        />
        <input type="hidden" name=format!("{}-MIN_NUM_FORMS", naming.prefix()) value="0" />
        <input type="hidden" name=format!("{}-MAX_NUM_FORMS", naming.prefix()) value="1000" />
    }
}
