//! Live camera capture
//!
//! The stream is held in a `StreamGuard` so it is stopped exactly once,
//! whether the user captures, cancels or the component goes away.

use desk_detox_common::{CaptureError, CapturedImage, MediaRelease, StreamGuard};
use leptos::html::Video;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

const JPEG_QUALITY: f64 = 0.85;

/// A camera stream; releasing it stops every track
pub struct LiveStream(MediaStream);

impl MediaRelease for LiveStream {
    fn release(&mut self) {
        for track in self.0.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

type GuardSlot = StoredValue<Option<StreamGuard<LiveStream>>, LocalStorage>;

fn release(guard: GuardSlot) {
    guard.try_update_value(|slot| {
        if let Some(g) = slot.as_mut() {
            g.release();
        }
    });
}

#[component]
pub fn CameraCapture(
    on_capture: Callback<CapturedImage>,
    on_cancel: Callback<()>,
    on_error: Callback<CaptureError>,
) -> impl IntoView {
    let video_ref = NodeRef::<Video>::new();
    let guard: GuardSlot = StoredValue::new_local(None);
    let (ready, set_ready) = signal(false);

    Effect::new(move |_| {
        let Some(video) = video_ref.get() else {
            return;
        };
        spawn_local(async move {
            match open_camera().await {
                Ok(stream) => {
                    video.set_src_object(Some(&stream));
                    let _ = video.play();
                    let fresh = StreamGuard::new(LiveStream(stream));
                    // if we were unmounted meanwhile the guard is dropped here, which stops the stream
                    if guard.try_update_value(move |slot| *slot = Some(fresh)).is_some() {
                        set_ready.set(true);
                    }
                }
                Err(e) => {
                    web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
                    on_error.run(e);
                }
            }
        });
    });

    on_cleanup(move || release(guard));

    let capture = move |_| {
        let live = guard
            .try_with_value(|slot| slot.as_ref().is_some_and(|g| g.is_active()))
            .unwrap_or(false);
        // no live device: nothing to capture
        if !live {
            return;
        }
        let Some(video) = video_ref.get_untracked() else {
            return;
        };

        match capture_frame(&video) {
            Ok(image) => {
                release(guard);
                on_capture.run(image);
            }
            Err(e) => on_error.run(e),
        }
    };

    let cancel = move |_| {
        release(guard);
        on_cancel.run(());
    };

    view! {
        <div class="camera">
            <video node_ref=video_ref class="camera-feed" autoplay=true playsinline=true prop:muted=true />
            <div class="camera-actions">
                <button class="btn btn-secondary" on:click=cancel>"Cancel"</button>
                <button
                    class="btn btn-primary btn-capture"
                    disabled=move || !ready.get()
                    on:click=capture
                >
                    "📸 Capture"
                </button>
            </div>
        </div>
    }
}

async fn open_camera() -> Result<MediaStream, CaptureError> {
    let window = web_sys::window().ok_or(CaptureError::Unavailable)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| CaptureError::Unavailable)?;

    // rear camera where there is one
    let video = js_sys::Object::new();
    js_sys::Reflect::set(&video, &"facingMode".into(), &"environment".into())
        .map_err(|_| CaptureError::Unavailable)?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video.into());
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|_| CaptureError::Unavailable)?;
    let stream = JsFuture::from(promise).await.map_err(camera_error)?;
    stream.dyn_into::<MediaStream>().map_err(|_| CaptureError::Unavailable)
}

/// `getUserMedia` rejects with a DOMException; map it by name
fn camera_error(err: JsValue) -> CaptureError {
    let name = js_sys::Reflect::get(&err, &"name".into())
        .ok()
        .and_then(|n| n.as_string())
        .unwrap_or_default();
    map_camera_error(&name)
}

fn map_camera_error(name: &str) -> CaptureError {
    match name {
        "NotAllowedError" | "SecurityError" => CaptureError::PermissionDenied,
        _ => CaptureError::Unavailable,
    }
}

/// Freeze the current frame onto a canvas and encode it as JPEG
fn capture_frame(video: &HtmlVideoElement) -> Result<CapturedImage, CaptureError> {
    let (width, height) = (video.video_width(), video.video_height());
    if width == 0 || height == 0 {
        return Err(CaptureError::Read("camera is not ready yet".to_string()));
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(CaptureError::Unavailable)?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_read)?
        .dyn_into()
        .map_err(js_read)?;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_read)?
        .ok_or_else(|| CaptureError::Read("no 2d context".to_string()))?
        .dyn_into()
        .map_err(js_read)?;
    ctx.draw_image_with_html_video_element(video, 0.0, 0.0)
        .map_err(js_read)?;

    let data_url = canvas
        .to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(JPEG_QUALITY))
        .map_err(js_read)?;
    CapturedImage::from_data_url(&data_url)
}

fn js_read<T: Into<JsValue>>(err: T) -> CaptureError {
    let value: JsValue = err.into();
    CaptureError::Read(value.as_string().unwrap_or_else(|| "canvas error".to_string()))
}
