//! Main application component
//!
//! Owns the `Controller` and the view toggles. Children get read-only
//! signals and report back through callbacks.

use crate::api::analyze_image;
use crate::components::{
    analyzing::AnalyzingOverlay,
    camera::CameraCapture,
    dashboard::Dashboard,
    error_banner::ErrorBanner,
    header::{Footer, Header},
    settings_panel::SettingsPanel,
    upload_area::UploadArea,
};
use desk_detox_common::{
    CaptureError, CapturedImage, Controller, DashboardView, Filter, ProcessingStatus, ViewOptions,
    DEFAULT_MODEL,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

/// Capture screen mode while idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureMode {
    Choose,
    Camera,
}

#[component]
pub fn App() -> impl IntoView {
    let api_key = RwSignal::new(option_env!("GEMINI_API_KEY").unwrap_or_default().to_string());
    let model = RwSignal::new(DEFAULT_MODEL.to_string());

    let (controller, set_controller) = signal(Controller::new());
    let (preview, set_preview) = signal(None::<String>);
    let filter = RwSignal::new(Filter::All);
    let options = RwSignal::new(ViewOptions::default());

    let (mode, set_mode) = signal(CaptureMode::Choose);
    let (camera_blocked, set_camera_blocked) = signal(false);
    let (notice, set_notice) = signal(None::<String>);

    let status = Memo::new(move |_| controller.with(|c| c.status()));
    let dashboard = Memo::new(move |_| {
        let filter = filter.get();
        let options = options.get();
        controller.with(|c| c.store().map(|s| DashboardView::build(s, filter, &options)))
    });
    let error_message = Signal::derive(move || {
        controller.with(|c| c.error().unwrap_or_default().to_string())
    });
    let has_image = Signal::derive(move || controller.with(|c| c.image().is_some()));

    // idle -> analyzing -> complete | error
    let submit = Callback::new(move |image: CapturedImage| {
        let mut started = false;
        set_controller.update(|c| started = c.begin(image.clone()).is_ok());
        if !started {
            return;
        }

        set_notice.set(None);
        set_mode.set(CaptureMode::Choose);
        set_preview.set(Some(image.to_data_url()));

        let key = api_key.get_untracked();
        let model = model.get_untracked();
        spawn_local(async move {
            let result = analyze_image(&key, &model, &image).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
            }
            set_controller.update(|c| {
                let _ = c.finish(result);
            });
        });
    });

    let reset = Callback::new(move |_: ()| {
        let mut done = false;
        set_controller.update(|c| done = c.reset().is_ok());
        if done {
            set_preview.set(None);
            set_notice.set(None);
            set_mode.set(CaptureMode::Choose);
            filter.set(Filter::All);
            options.set(ViewOptions::default());
        }
    });

    let retry = Callback::new(move |_: ()| {
        let image = controller.with_untracked(|c| c.image().cloned());
        set_controller.update(|c| {
            let _ = c.reset();
        });
        if let Some(image) = image {
            submit.run(image);
        }
    });

    let on_delete = Callback::new(move |id: i64| {
        set_controller.update(|c| {
            if let Some(store) = c.store_mut() {
                store.delete(id);
            }
        });
    });
    let on_archive = Callback::new(move |id: i64| {
        set_controller.update(|c| {
            if let Some(store) = c.store_mut() {
                store.archive(id);
            }
        });
    });
    let on_toggle_paid = Callback::new(move |id: i64| {
        set_controller.update(|c| {
            if let Some(store) = c.store_mut() {
                store.toggle_paid(id);
            }
        });
    });

    let on_camera_error = Callback::new(move |e: CaptureError| {
        if e == CaptureError::PermissionDenied {
            set_camera_blocked.set(true);
        }
        set_notice.set(Some(e.to_string()));
        set_mode.set(CaptureMode::Choose);
    });
    let on_rejected = Callback::new(move |message: String| set_notice.set(Some(message)));
    let open_camera = move |_| {
        set_notice.set(None);
        set_mode.set(CaptureMode::Camera);
    };

    let can_capture = Signal::derive(move || status.get() == ProcessingStatus::Idle);
    let can_reset = Signal::derive(move || {
        matches!(status.get(), ProcessingStatus::Complete | ProcessingStatus::Error)
    });

    view! {
        <div class="container">
            <Header model=model on_reset=reset can_reset=can_reset />

            {move || match status.get() {
                ProcessingStatus::Idle => view! {
                    <SettingsPanel api_key=api_key model=model />

                    <Show when=move || api_key.with(|k| k.trim().is_empty())>
                        <p class="notice">"🔑 Enter a Gemini API key above to analyse photos."</p>
                    </Show>

                    {move || notice.get().map(|n| view! { <p class="notice notice-warning">{n}</p> })}

                    {move || match mode.get() {
                        CaptureMode::Camera => view! {
                            <CameraCapture
                                on_capture=submit
                                on_cancel=Callback::new(move |_: ()| set_mode.set(CaptureMode::Choose))
                                on_error=on_camera_error
                            />
                        }
                        .into_any(),
                        CaptureMode::Choose => view! {
                            <div class="capture-choice">
                                <button
                                    class="btn btn-primary btn-large"
                                    disabled=move || camera_blocked.get() || !can_capture.get()
                                    on:click=open_camera
                                >
                                    "📷 Take a photo"
                                </button>
                                <UploadArea enabled=can_capture on_image=submit on_rejected=on_rejected />
                            </div>
                        }
                        .into_any(),
                    }}
                }
                .into_any(),

                ProcessingStatus::Analyzing => view! { <AnalyzingOverlay preview=preview /> }.into_any(),

                ProcessingStatus::Complete => view! {
                    <Dashboard
                        view=dashboard
                        filter=filter
                        options=options
                        preview=preview
                        on_delete=on_delete
                        on_archive=on_archive
                        on_toggle_paid=on_toggle_paid
                    />
                }
                .into_any(),

                ProcessingStatus::Error => view! {
                    <ErrorBanner
                        message=error_message
                        can_retry=has_image
                        on_retry=retry
                        on_reset=reset
                    />
                }
                .into_any(),
            }}

            <Footer />
        </div>
    }
}
