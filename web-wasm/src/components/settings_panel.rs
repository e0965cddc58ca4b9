//! Settings panel

use leptos::prelude::*;

#[component]
pub fn SettingsPanel(api_key: RwSignal<String>, model: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="settings-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="api-key">"Gemini API Key"</label>
                    <input
                        type="password"
                        id="api-key"
                        placeholder="Enter your API key..."
                        prop:value=move || api_key.get()
                        on:input=move |ev| {
                            api_key.set(event_target_value(&ev));
                        }
                    />
                    <a
                        href="https://aistudio.google.com/app/apikey"
                        target="_blank"
                        rel="noopener noreferrer"
                        class="api-key-link"
                    >
                        "Get an API key →"
                    </a>
                </div>

                <div class="form-group">
                    <label for="model">"Model"</label>
                    <input
                        type="text"
                        id="model"
                        prop:value=move || model.get()
                        on:input=move |ev| {
                            model.set(event_target_value(&ev));
                        }
                    />
                </div>
            </div>
        </div>
    }
}
