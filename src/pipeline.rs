//! Upload-to-reading orchestration.
//!
//! upload → preview → generating → result | error. The preview and
//! generating steps follow the upload with no confirmation in between, and
//! every step reports the new view through `notify` so the frontend can
//! repaint before the backend call returns.

use crate::capture::{self, DataUrl};
use crate::error::{FortuneError, Result};
use crate::llm::{FortuneBackend, FortuneRequest};
use crate::render::{self, Fortune};
use crate::session::{Event, Mood, Phase, SessionStore, ViewModel};
use crate::share::{self, Clipboard, NativeShare, ShareFeedback, SHARE_TITLE};
use std::path::Path;

/// Run one reading for an already-encoded image.
///
/// Backend failures never escape: they become the fixed error panel. The
/// only `Err` is a rejected transition (e.g. an upload while a reading is
/// already on screen).
pub async fn generate_reading<B: FortuneBackend>(
    store: &SessionStore,
    backend: &B,
    image: DataUrl,
    notify: impl Fn(&ViewModel),
) -> Result<ViewModel> {
    let pipeline_start = std::time::Instant::now();

    let previewing = store.apply(Event::ImageSelected(image.clone()))?;
    notify(&ViewModel::from(&previewing));

    let generating = store.apply(Event::BeginGeneration)?;
    notify(&ViewModel::from(&generating));
    let ticket = generating.ticket;

    let request = FortuneRequest::new(&image, generating.mood, &generating.note);
    log::info!(
        "[PIPELINE] Reading #{} started (mood={}, note={} chars)",
        ticket,
        generating.mood,
        generating.note.trim().len()
    );

    let event = match backend.generate(&request).await {
        Ok(text) => {
            log::info!("[PIPELINE] Reading #{}: {} chars of narrative", ticket, text.len());
            Event::GenerationSucceeded {
                ticket,
                fortune: Fortune::from_markdown(&text),
            }
        }
        Err(e) => {
            match &e {
                FortuneError::MissingApiKey => log::warn!("[PIPELINE] Reading #{}: {}", ticket, e),
                _ => log::error!("[PIPELINE] Reading #{} failed: {}", ticket, e),
            }
            Event::GenerationFailed {
                ticket,
                fortune: render::render_error(),
            }
        }
    };

    let settled = store.apply(event)?;
    let view = ViewModel::from(&settled);
    notify(&view);

    log::info!(
        "[PIPELINE] Reading #{} settled as {:?} in {}ms",
        ticket,
        view.panel,
        pipeline_start.elapsed().as_millis()
    );
    Ok(view)
}

/// Encode uploaded bytes and run a reading.
///
/// An empty file is refused before any transition.
pub async fn upload_bytes<B: FortuneBackend>(
    store: &SessionStore,
    backend: &B,
    bytes: &[u8],
    file_name: &str,
    notify: impl Fn(&ViewModel),
) -> Result<ViewModel> {
    let image = capture::encode_upload(bytes, file_name)?;
    generate_reading(store, backend, image, notify).await
}

/// Read a file from disk and run a reading.
///
/// A read failure is returned before any transition, so the upload prompt
/// stays up.
pub async fn upload_path<B: FortuneBackend>(
    store: &SessionStore,
    backend: &B,
    path: &Path,
    notify: impl Fn(&ViewModel),
) -> Result<ViewModel> {
    let image = capture::read_image_as_data_url(path).await?;
    generate_reading(store, backend, image, notify).await
}

pub fn select_mood(store: &SessionStore, tag: &str) -> Result<ViewModel> {
    let mood = Mood::from_tag(tag).unwrap_or_else(|| {
        log::warn!("[SESSION] Unknown mood tag {:?}, using General", tag);
        Mood::General
    });
    let session = store.apply(Event::SelectMood(mood))?;
    Ok(ViewModel::from(&session))
}

pub fn set_note(store: &SessionStore, note: String) -> Result<ViewModel> {
    let session = store.apply(Event::EditNote(note))?;
    Ok(ViewModel::from(&session))
}

pub fn reset(store: &SessionStore) -> Result<ViewModel> {
    let session = store.apply(Event::Reset)?;
    Ok(ViewModel::from(&session))
}

/// Share the reading on screen, falling back to the clipboard.
pub fn share_current(
    store: &SessionStore,
    native: &impl NativeShare,
    clipboard: &impl Clipboard,
) -> Result<ShareFeedback> {
    let session = store.snapshot();
    let fortune = match (&session.fortune, session.phase) {
        (Some(fortune), Phase::ShowingResult) => fortune,
        _ => return Err(FortuneError::NothingToShare(session.phase)),
    };
    let outcome = share::share_or_copy(native, clipboard, SHARE_TITLE, &fortune.plain_text());
    Ok(ShareFeedback::from(outcome))
}
