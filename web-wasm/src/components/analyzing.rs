//! Blocking overlay while the model call is in flight

use leptos::prelude::*;

#[component]
pub fn AnalyzingOverlay(#[prop(into)] preview: Signal<Option<String>>) -> impl IntoView {
    view! {
        <div class="analyzing">
            {move || preview.get().map(|src| view! { <img class="preview blurred" src=src alt="Desk photo" /> })}
            <div class="analyzing-overlay">
                <div class="spinner" />
                <p class="progress-text">"Scanning your desk..."</p>
                <p class="text-muted">"Reading senders, deadlines and amounts"</p>
            </div>
        </div>
    }
}
