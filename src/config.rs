//! Runtime configuration from the environment.
//!
//! `.env.local` / `.env` are loaded into the process environment at startup
//! (see `lib.rs`); everything here is read at call time so a key saved from
//! the settings panel applies to the next request.

use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, PartialEq)]
pub struct FortuneConfig {
    pub model: String,
    pub api_base: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for FortuneConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl FortuneConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank or unparsable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            api_base: get("GEMINI_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            max_tokens: get("GEMINI_MAX_TOKENS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_tokens),
            temperature: get("GEMINI_TEMPERATURE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.temperature),
        }
    }
}

/// Load `.env.local`, else `.env`, from `root`. First file found wins.
///
/// Runs before the logger exists, so the outcome is returned for the caller
/// to log.
pub fn load_env_files(root: &Path) -> Option<Result<PathBuf, String>> {
    [".env.local", ".env"]
        .into_iter()
        .map(|name| root.join(name))
        .find(|path| path.exists())
        .map(|path| match dotenvy::from_path(&path) {
            Ok(()) => Ok(path),
            Err(e) => Err(format!("{}: {}", path.display(), e)),
        })
}
