//! Session domain: the UI state machine.
//!
//! `state.rs` holds the pure transition table. `SessionStore` is the single
//! shared instance the commands mutate, and `ViewModel` is what the frontend
//! renders.

mod state;

pub use state::{update, visible_panel, Event, Mood, Panel, Phase, Session, TransitionError};

use serde::Serialize;
use std::sync::Mutex;

/// Everything the frontend needs to draw the current screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub panel: Panel,
    pub mood: Mood,
    pub moods: Vec<Mood>,
    pub mood_selectable: bool,
    pub note: String,
    pub image_preview: Option<String>,
    pub result_html: Option<String>,
}

impl From<&Session> for ViewModel {
    fn from(session: &Session) -> Self {
        Self {
            panel: session.panel(),
            mood: session.mood,
            moods: Mood::ALL.to_vec(),
            mood_selectable: session.phase == Phase::AwaitingUpload,
            note: session.note.clone(),
            image_preview: session.image.as_ref().map(|i| i.to_string()),
            result_html: session.fortune.as_ref().map(|f| f.html.clone()),
        }
    }
}

/// Thread-safe holder for the one live session.
///
/// The lock is only ever held for a single `update`, never across an await.
pub struct SessionStore {
    session: Mutex<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(Session::default()),
        }
    }

    /// Run one event through the transition table and store the result.
    pub fn apply(&self, event: Event) -> Result<Session, TransitionError> {
        let mut guard = self.session.lock().unwrap_or_else(|e| e.into_inner());
        let next = update(&guard, event)?;
        *guard = next.clone();
        Ok(next)
    }

    pub fn snapshot(&self) -> Session {
        self.session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn view(&self) -> ViewModel {
        ViewModel::from(&self.snapshot())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::DataUrl;

    #[test]
    fn view_of_fresh_session() {
        let view = SessionStore::new().view();
        assert_eq!(view.panel, Panel::UploadPrompt);
        assert!(view.mood_selectable);
        assert_eq!(view.moods.len(), Mood::ALL.len());
        assert!(view.image_preview.is_none());
        assert!(view.result_html.is_none());
    }

    #[test]
    fn rejected_event_leaves_store_untouched() {
        let store = SessionStore::new();
        store
            .apply(Event::ImageSelected(DataUrl::encode(b"x", "image/png")))
            .unwrap();
        assert!(store.apply(Event::SelectMood(Mood::Love)).is_err());

        let s = store.snapshot();
        assert_eq!(s.phase, Phase::PreviewingImage);
        assert_eq!(s.mood, Mood::General);
    }

    #[test]
    fn view_serializes_camel_case() {
        let store = SessionStore::new();
        store
            .apply(Event::ImageSelected(DataUrl::encode(b"x", "image/png")))
            .unwrap();
        let json = serde_json::to_value(store.view()).unwrap();
        assert_eq!(json["panel"], "imagePreview");
        assert_eq!(json["mood"], "General");
        assert_eq!(json["moodSelectable"], false);
        assert_eq!(json["imagePreview"], "data:image/png;base64,eA==");
    }
}
