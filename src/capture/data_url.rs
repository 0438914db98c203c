//! Strict `data:<mime>;base64,<payload>` parsing and encoding.

use crate::error::{FortuneError, Result};
use base64::Engine;
use serde::Serialize;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// An image held as a base64 data URL, split into its MIME type and payload.
///
/// The serialized form is the full URL so the frontend can use it directly
/// as an `<img src>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    mime_type: String,
    payload: String,
}

impl DataUrl {
    /// Encode raw bytes under the given MIME type.
    pub fn encode(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            payload: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Parse a data URL, rejecting anything that is not exactly
    /// `data:<mime>;base64,<payload>` with a valid base64 payload.
    pub fn parse(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix(SCHEME)
            .ok_or(FortuneError::MalformedDataUrl("missing data: scheme"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or(FortuneError::MalformedDataUrl("missing comma separator"))?;
        let mime_type = header
            .strip_suffix(BASE64_MARKER)
            .ok_or(FortuneError::MalformedDataUrl("payload is not base64"))?;

        if mime_type.is_empty() || !mime_type.contains('/') || mime_type.contains(';') {
            return Err(FortuneError::MalformedDataUrl("invalid MIME type"));
        }
        if payload.is_empty() {
            return Err(FortuneError::MalformedDataUrl("empty payload"));
        }
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|_| FortuneError::MalformedDataUrl("payload is not valid base64"))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            payload: payload.to_string(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload, without the header.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.payload)
            .map_err(|_| FortuneError::MalformedDataUrl("payload is not valid base64"))
    }
}

impl std::fmt::Display for DataUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{},{}", SCHEME, self.mime_type, BASE64_MARKER, self.payload)
    }
}

impl Serialize for DataUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
