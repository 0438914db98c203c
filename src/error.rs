//! Error taxonomy for the fortune flow.
//!
//! Tauri commands flatten these to `String` at the boundary; everything
//! below the command layer returns `FortuneError`.

use crate::session::{Phase, TransitionError};

#[derive(Debug, thiserror::Error)]
pub enum FortuneError {
    #[error("Could not read image {path}: {source}")]
    ImageRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image {0} is empty")]
    EmptyImage(String),

    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(&'static str),

    #[error("No GEMINI_API_KEY configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API returned {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Gemini response contained no text")]
    EmptyResponse,

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("No fortune to share in phase {0:?}")]
    NothingToShare(Phase),

    #[error("Share failed: {0}")]
    Share(String),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

pub type Result<T> = std::result::Result<T, FortuneError>;
