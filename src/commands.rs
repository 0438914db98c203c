//! Tauri command handlers.
//!
//! Thin wrappers that bridge frontend invoke() calls to the pipeline. Each
//! state change is also emitted as `view-changed` so the window repaints
//! mid-flight (preview and loader show before the backend answers).

use crate::llm::GeminiBackend;
use crate::pipeline;
use crate::session::{SessionStore, ViewModel};
use crate::share::{self, ShareFeedback};
use tauri::ipc::{InvokeBody, Request};
use tauri::{AppHandle, Emitter, State};
use tauri_plugin_dialog::DialogExt;

pub const VIEW_EVENT: &str = "view-changed";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "heic"];

fn emit_view(app: &AppHandle, view: &ViewModel) {
    if let Err(e) = app.emit(VIEW_EVENT, view) {
        log::error!("[UI] Failed to emit {}: {}", VIEW_EVENT, e);
    }
}

/// Tauri command: current view. Called by the window on load.
#[tauri::command]
pub fn get_view(state: State<'_, SessionStore>) -> ViewModel {
    state.view()
}

/// Tauri command: change the mood focus (upload prompt only).
#[tauri::command]
pub fn select_mood(
    app: AppHandle,
    state: State<'_, SessionStore>,
    mood: String,
) -> Result<ViewModel, String> {
    let view = pipeline::select_mood(&state, &mood).map_err(|e| e.to_string())?;
    emit_view(&app, &view);
    Ok(view)
}

/// Tauri command: store the personal note typed in the textarea.
#[tauri::command]
pub fn set_note(state: State<'_, SessionStore>, note: String) -> Result<ViewModel, String> {
    pipeline::set_note(&state, note).map_err(|e| e.to_string())
}

/// Tauri command: start over. Any in-flight reading keeps running but its
/// result is discarded.
#[tauri::command]
pub fn reset_session(app: AppHandle, state: State<'_, SessionStore>) -> Result<ViewModel, String> {
    let view = pipeline::reset(&state).map_err(|e| e.to_string())?;
    emit_view(&app, &view);
    Ok(view)
}

/// Header carrying the (percent-encoded) name of a raw upload.
const FILE_NAME_HEADER: &str = "x-file-name";

/// Tauri command: run a reading on bytes from the file input or a drop.
///
/// The image arrives as a raw IPC body; its name rides in `x-file-name`.
#[tauri::command]
pub async fn upload_image(
    app: AppHandle,
    state: State<'_, SessionStore>,
    backend: State<'_, GeminiBackend>,
    request: Request<'_>,
) -> Result<ViewModel, String> {
    let InvokeBody::Raw(data) = request.body() else {
        return Err("upload_image expects a raw byte body".to_string());
    };
    let file_name = request
        .headers()
        .get(FILE_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    pipeline::upload_bytes(&state, backend.inner(), data, file_name, |view| {
        emit_view(&app, view)
    })
    .await
    .map_err(|e| e.to_string())
}

/// Tauri command: pick a cup photo with the native dialog and run a reading.
///
/// Cancelling the dialog leaves the session untouched.
#[tauri::command]
pub async fn pick_image(
    app: AppHandle,
    state: State<'_, SessionStore>,
    backend: State<'_, GeminiBackend>,
) -> Result<ViewModel, String> {
    let (tx, rx) = tokio::sync::oneshot::channel();
    app.dialog()
        .file()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file(move |picked| {
            let _ = tx.send(picked);
        });

    let Some(picked) = rx.await.map_err(|e| e.to_string())? else {
        log::info!("[CAPTURE] File dialog cancelled");
        return Ok(state.view());
    };
    let path = picked.into_path().map_err(|e| e.to_string())?;

    pipeline::upload_path(&state, backend.inner(), &path, |view| emit_view(&app, view))
        .await
        .map_err(|e| e.to_string())
}

/// Tauri command: share the reading, or copy it when sharing isn't possible.
#[tauri::command]
pub fn share_fortune(state: State<'_, SessionStore>) -> Result<ShareFeedback, String> {
    pipeline::share_current(&state, &share::Unavailable, &share::SystemClipboard)
        .map_err(|e| e.to_string())
}
