//! The session record and its transition table.
//!
//! `update` is the only way a `Session` changes. It takes the current
//! record by reference and returns the next one, so every transition can be
//! checked in isolation and the view can be derived from any snapshot.

use crate::capture::DataUrl;
use crate::render::Fortune;
use serde::{Deserialize, Serialize};

/// Thematic focus for the reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[default]
    General,
    Love,
    Career,
    Health,
    Wealth,
    Family,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::General,
        Mood::Love,
        Mood::Career,
        Mood::Health,
        Mood::Wealth,
        Mood::Family,
    ];

    /// The tag shown on the mood button and embedded in the prompt.
    pub fn tag(self) -> &'static str {
        match self {
            Mood::General => "General",
            Mood::Love => "Love",
            Mood::Career => "Career",
            Mood::Health => "Health",
            Mood::Wealth => "Wealth",
            Mood::Family => "Family",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Mood> {
        Mood::ALL.into_iter().find(|m| m.tag().eq_ignore_ascii_case(tag.trim()))
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Phase {
    #[default]
    AwaitingUpload,
    PreviewingImage,
    Generating,
    ShowingResult,
    ShowingError,
}

/// The one panel the frontend shows for a given phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Panel {
    UploadPrompt,
    ImagePreview,
    Loader,
    Result,
    Error,
}

pub fn visible_panel(phase: Phase) -> Panel {
    match phase {
        Phase::AwaitingUpload => Panel::UploadPrompt,
        Phase::PreviewingImage => Panel::ImagePreview,
        Phase::Generating => Panel::Loader,
        Phase::ShowingResult => Panel::Result,
        Phase::ShowingError => Panel::Error,
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    SelectMood(Mood),
    EditNote(String),
    ImageSelected(DataUrl),
    BeginGeneration,
    GenerationSucceeded { ticket: u64, fortune: Fortune },
    GenerationFailed { ticket: u64, fortune: Fortune },
    Reset,
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Event::SelectMood(_) => "SelectMood",
            Event::EditNote(_) => "EditNote",
            Event::ImageSelected(_) => "ImageSelected",
            Event::BeginGeneration => "BeginGeneration",
            Event::GenerationSucceeded { .. } => "GenerationSucceeded",
            Event::GenerationFailed { .. } => "GenerationFailed",
            Event::Reset => "Reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{event} is not allowed while {phase:?}")]
pub struct TransitionError {
    pub phase: Phase,
    pub event: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub mood: Mood,
    pub phase: Phase,
    pub image: Option<DataUrl>,
    pub note: String,
    pub fortune: Option<Fortune>,
    /// Bumped on every `BeginGeneration`; a settle carrying an older value
    /// belongs to a request the user already reset away from.
    pub ticket: u64,
}

impl Session {
    pub fn panel(&self) -> Panel {
        visible_panel(self.phase)
    }
}

/// Apply one event to a session, returning the next session.
pub fn update(session: &Session, event: Event) -> Result<Session, TransitionError> {
    let mut next = session.clone();

    match (session.phase, event) {
        (Phase::AwaitingUpload, Event::SelectMood(mood)) => {
            next.mood = mood;
        }
        (Phase::AwaitingUpload, Event::EditNote(note)) => {
            next.note = note;
        }
        (Phase::AwaitingUpload, Event::ImageSelected(image)) => {
            next.image = Some(image);
            next.phase = Phase::PreviewingImage;
        }
        (Phase::PreviewingImage, Event::BeginGeneration) => {
            next.ticket = session.ticket.wrapping_add(1);
            next.fortune = None;
            next.phase = Phase::Generating;
        }
        (_, Event::GenerationSucceeded { ticket, .. } | Event::GenerationFailed { ticket, .. })
            if ticket != session.ticket || session.phase != Phase::Generating =>
        {
            log::info!(
                "[SESSION] Dropping settle for ticket {} (current {}, {:?})",
                ticket,
                session.ticket,
                session.phase
            );
        }
        (Phase::Generating, Event::GenerationSucceeded { fortune, .. }) => {
            next.fortune = Some(fortune);
            next.phase = Phase::ShowingResult;
        }
        (Phase::Generating, Event::GenerationFailed { fortune, .. }) => {
            next.fortune = Some(fortune);
            next.phase = Phase::ShowingError;
        }
        (_, Event::Reset) => {
            next.image = None;
            next.note.clear();
            next.fortune = None;
            next.phase = Phase::AwaitingUpload;
        }
        (phase, event) => {
            return Err(TransitionError {
                phase,
                event: event.name(),
            });
        }
    }

    if next.phase != session.phase {
        log::info!("[SESSION] {:?} -> {:?}", session.phase, next.phase);
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> DataUrl {
        DataUrl::encode(b"cup", "image/jpeg")
    }

    fn fortune(text: &str) -> Fortune {
        Fortune::from_markdown(text)
    }

    fn generating() -> Session {
        let s = update(&Session::default(), Event::ImageSelected(image())).unwrap();
        update(&s, Event::BeginGeneration).unwrap()
    }

    #[test]
    fn initial_session_awaits_upload_with_general_mood() {
        let s = Session::default();
        assert_eq!(s.phase, Phase::AwaitingUpload);
        assert_eq!(s.panel(), Panel::UploadPrompt);
        assert_eq!(s.mood, Mood::General);
        assert!(s.image.is_none());
    }

    #[test]
    fn happy_path_walks_every_panel() {
        let s = update(&Session::default(), Event::SelectMood(Mood::Love)).unwrap();
        let s = update(&s, Event::EditNote("turning 30 soon".into())).unwrap();
        let s = update(&s, Event::ImageSelected(image())).unwrap();
        assert_eq!(s.panel(), Panel::ImagePreview);

        let s = update(&s, Event::BeginGeneration).unwrap();
        assert_eq!(s.panel(), Panel::Loader);
        assert_eq!(s.ticket, 1);

        let ticket = s.ticket;
        let s = update(&s, Event::GenerationSucceeded { ticket, fortune: fortune("# Hi") }).unwrap();
        assert_eq!(s.panel(), Panel::Result);
        assert_eq!(s.mood, Mood::Love);
        assert!(s.fortune.is_some());
    }

    #[test]
    fn failure_shows_error_panel() {
        let s = generating();
        let ticket = s.ticket;
        let s = update(&s, Event::GenerationFailed { ticket, fortune: fortune("oops") }).unwrap();
        assert_eq!(s.panel(), Panel::Error);
    }

    #[test]
    fn mood_locked_outside_upload_prompt() {
        let s = update(&Session::default(), Event::ImageSelected(image())).unwrap();
        let err = update(&s, Event::SelectMood(Mood::Career)).unwrap_err();
        assert_eq!(err.phase, Phase::PreviewingImage);
        assert_eq!(err.event, "SelectMood");
    }

    #[test]
    fn second_upload_requires_reset() {
        let s = generating();
        assert!(update(&s, Event::ImageSelected(image())).is_err());
    }

    #[test]
    fn reset_clears_image_note_and_fortune_but_keeps_mood() {
        let s = update(&Session::default(), Event::SelectMood(Mood::Wealth)).unwrap();
        let s = update(&s, Event::EditNote("new job".into())).unwrap();
        let s = update(&s, Event::ImageSelected(image())).unwrap();
        let s = update(&s, Event::BeginGeneration).unwrap();
        let ticket = s.ticket;
        let s = update(&s, Event::GenerationSucceeded { ticket, fortune: fortune("x") }).unwrap();

        let s = update(&s, Event::Reset).unwrap();
        assert_eq!(s.phase, Phase::AwaitingUpload);
        assert!(s.image.is_none());
        assert!(s.note.is_empty());
        assert!(s.fortune.is_none());
        assert_eq!(s.mood, Mood::Wealth);
    }

    #[test]
    fn reset_allowed_from_every_phase() {
        let preview = update(&Session::default(), Event::ImageSelected(image())).unwrap();
        let gen = generating();
        let ticket = gen.ticket;
        let result = update(&gen, Event::GenerationSucceeded { ticket, fortune: fortune("a") }).unwrap();
        let error = update(&gen, Event::GenerationFailed { ticket, fortune: fortune("b") }).unwrap();

        for s in [Session::default(), preview, gen, result, error] {
            let after = update(&s, Event::Reset).unwrap();
            assert_eq!(after.panel(), Panel::UploadPrompt);
            assert!(after.image.is_none());
            assert!(after.note.is_empty());
        }
    }

    #[test]
    fn settle_after_reset_is_dropped() {
        let s = generating();
        let stale = s.ticket;
        let s = update(&s, Event::Reset).unwrap();

        let s = update(&s, Event::GenerationSucceeded { ticket: stale, fortune: fortune("late") }).unwrap();
        assert_eq!(s.panel(), Panel::UploadPrompt);
        assert!(s.fortune.is_none());
    }

    #[test]
    fn settle_from_previous_attempt_does_not_overwrite_new_one() {
        let s = generating();
        let first = s.ticket;
        let s = update(&s, Event::Reset).unwrap();
        let s = update(&s, Event::ImageSelected(image())).unwrap();
        let s = update(&s, Event::BeginGeneration).unwrap();
        assert_ne!(s.ticket, first);

        let s = update(&s, Event::GenerationFailed { ticket: first, fortune: fortune("old") }).unwrap();
        assert_eq!(s.panel(), Panel::Loader);
    }

    #[test]
    fn mood_tags_round_trip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_tag(mood.tag()), Some(mood));
        }
        assert_eq!(Mood::from_tag(" love "), Some(Mood::Love));
        assert_eq!(Mood::from_tag("Astrology"), None);
    }
}
