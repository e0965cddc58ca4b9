//! Error state

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<String>,
    #[prop(into)] can_retry: Signal<bool>,
    on_retry: Callback<()>,
    on_reset: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="error-banner" role="alert">
            <div class="error-icon">"⚠️"</div>
            <p>{move || message.get()}</p>
            <div class="api-actions">
                <Show when=move || can_retry.get()>
                    <button class="btn btn-primary" on:click=move |_| on_retry.run(())>
                        "Try again"
                    </button>
                </Show>
                <button class="btn btn-secondary" on:click=move |_| on_reset.run(())>
                    "Start over"
                </button>
            </div>
        </div>
    }
}
