//! Header and footer

use leptos::prelude::*;

#[component]
pub fn Header(
    #[prop(into)] model: Signal<String>,
    #[prop(into)] can_reset: Signal<bool>,
    on_reset: Callback<()>,
) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Desk Detox"</h1>
            <span class="model-badge">{move || model.get()}</span>
            <Show when=move || can_reset.get()>
                <button class="btn btn-tertiary btn-small" on:click=move |_| on_reset.run(())>
                    "New scan"
                </button>
            </Show>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <p class="text-muted">"Images are sent to Gemini for analysis and are not stored."</p>
        </footer>
    }
}
