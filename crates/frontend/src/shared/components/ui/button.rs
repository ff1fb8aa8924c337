use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "button--primary",
            ButtonVariant::Secondary => "button--secondary",
        }
    }
}

/// Action button for use inside the server form.
///
/// Always `type="button"`, so clicking it never submits the surrounding form.
#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    on_click: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=format!("button {}", variant.class())
            on:click=move |_| on_click.run(())
        >
            {children()}
        </button>
    }
}
