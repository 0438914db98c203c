//! Share/export of the rendered reading.
//!
//! Native share first, clipboard second. Whatever happens, the caller gets
//! a feedback label for the share button that reverts after
//! `FEEDBACK_REVERT`.

use crate::error::{FortuneError, Result};
use serde::Serialize;
use std::time::Duration;

pub const SHARE_TITLE: &str = "My Coffee Fortune";
pub const FEEDBACK_REVERT: Duration = Duration::from_secs(2);

/// A platform share sheet.
pub trait NativeShare {
    /// `false` when the platform has no share sheet at all.
    fn is_available(&self) -> bool;
    fn share(&self, title: &str, text: &str) -> Result<()>;
}

pub trait Clipboard {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// Desktop platforms expose no share sheet to the webview.
pub struct Unavailable;

impl NativeShare for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn share(&self, _title: &str, _text: &str) -> Result<()> {
        Err(FortuneError::Share("no native share sheet on this platform".to_string()))
    }
}

/// System clipboard via arboard. Reliable where navigator.clipboard is
/// blocked inside the webview.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShareOutcome {
    Shared,
    Copied,
    Failed,
}

/// Temporary label/icon swap for the share button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareFeedback {
    pub outcome: ShareOutcome,
    pub label: &'static str,
    pub icon: &'static str,
    pub revert_after_ms: u64,
}

impl From<ShareOutcome> for ShareFeedback {
    fn from(outcome: ShareOutcome) -> Self {
        let (label, icon) = match outcome {
            ShareOutcome::Shared => ("Shared!", "check"),
            ShareOutcome::Copied => ("Copied!", "check"),
            ShareOutcome::Failed => ("Failed", "x"),
        };
        Self {
            outcome,
            label,
            icon,
            revert_after_ms: FEEDBACK_REVERT.as_millis() as u64,
        }
    }
}

/// Share `text`, falling back to the clipboard. Failures are logged and
/// reported only through the returned outcome.
pub fn share_or_copy(
    native: &impl NativeShare,
    clipboard: &impl Clipboard,
    title: &str,
    text: &str,
) -> ShareOutcome {
    if native.is_available() {
        match native.share(title, text) {
            Ok(()) => {
                log::info!("[SHARE] Shared {} chars via native sheet", text.len());
                return ShareOutcome::Shared;
            }
            Err(e) => log::warn!("[SHARE] Native share failed, falling back to clipboard: {}", e),
        }
    }

    match clipboard.set_text(text) {
        Ok(()) => {
            log::info!("[SHARE] Copied {} chars to clipboard", text.len());
            ShareOutcome::Copied
        }
        Err(e) => {
            log::warn!("[SHARE] Clipboard write failed: {}", e);
            ShareOutcome::Failed
        }
    }
}
