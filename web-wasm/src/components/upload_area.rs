//! Upload area: file picker and drag-and-drop
//!
//! Only the first file of a selection or drop is used. Files the browser
//! does not report as `image/*` are rejected before being read.

use desk_detox_common::capture::{is_image_mime, sniff_mime};
use desk_detox_common::CapturedImage;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{DragEvent, FileList, HtmlInputElement};

#[component]
pub fn UploadArea(
    #[prop(into)] enabled: Signal<bool>,
    on_image: Callback<CapturedImage>,
    on_rejected: Callback<String>,
) -> impl IntoView {
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    let handle_files = move |files: FileList| {
        let Some(file) = files.get(0) else {
            return;
        };
        let file_name = file.name();
        let file_type = file.type_();
        if !is_image_mime(&file_type) {
            on_rejected.run(format!("{} is not an image", file_name));
            return;
        }

        spawn_local(async move {
            let file = gloo::file::File::from(file);
            match gloo::file::futures::read_as_bytes(&file).await {
                Ok(bytes) => match to_captured(bytes, &file_type) {
                    Some(image) => on_image.run(image),
                    None => on_rejected.run(format!("{} is empty", file_name)),
                },
                Err(e) => on_rejected.run(format!("Could not read {}: {}", file_name, e)),
            }
        });
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        if !enabled.get_untracked() {
            return;
        }

        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            handle_files(files);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if enabled.get_untracked() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if !enabled.get_untracked() {
            return;
        }
        if let Some(input) = input_ref.get_untracked() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            handle_files(files);
        }
        // picking the same file again must fire `change`
        input.set_value("");
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if !enabled.get() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                type="file"
                accept="image/*"
                class="hidden"
                node_ref=input_ref
                on:change=on_change
                on:click=|ev| ev.stop_propagation()
            />
            <div class="upload-icon">"🖼️"</div>
            <p>"Drop a photo of your desk here, or click to choose one"</p>
            <p class="text-muted">"JPEG, PNG, WebP, HEIC"</p>
        </div>
    }
}

/// Browser-reported type, corrected by the file signature when known
fn to_captured(bytes: Vec<u8>, reported_type: &str) -> Option<CapturedImage> {
    if bytes.is_empty() {
        return None;
    }
    let mime = sniff_mime(&bytes).unwrap_or(reported_type).to_string();
    Some(CapturedImage::new(bytes, mime))
}
