//! Credential resolution and settings-panel commands.
//!
//! Handles:
//! - API key lookup (env var first, then the OS keychain via keyring)
//! - Saving a key from the settings panel
//! - A minimal connection test against Gemini

use crate::config::{FortuneConfig, API_KEY_ENV};
use crate::llm::gemini::{endpoint, API_KEY_HEADER};
use serde::Serialize;

const KEYRING_SERVICE: &str = "coffee-fortune";
const KEYRING_USER: &str = "gemini";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeySource {
    Environment,
    Keychain,
    Missing,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialStatus {
    pub source: KeySource,
    pub model: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Decide where the key comes from. The keychain is only consulted when the
/// environment has nothing.
fn pick_key(
    env_value: Option<String>,
    keychain: impl FnOnce() -> Option<String>,
) -> (KeySource, Option<String>) {
    if let Some(key) = non_empty(env_value) {
        return (KeySource::Environment, Some(key));
    }
    match non_empty(keychain()) {
        Some(key) => (KeySource::Keychain, Some(key)),
        None => (KeySource::Missing, None),
    }
}

fn keychain_key() -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
    entry.get_password().ok()
}

/// Find the Gemini API key, at call time.
///
/// A key found only in the keychain is copied into the environment so later
/// lookups skip the keychain round-trip.
pub fn resolve_api_key() -> Option<String> {
    let (source, key) = pick_key(std::env::var(API_KEY_ENV).ok(), keychain_key);
    match (source, &key) {
        (KeySource::Keychain, Some(k)) => {
            std::env::set_var(API_KEY_ENV, k);
            log::info!("[SETTINGS] Loaded Gemini key from OS keychain");
        }
        (KeySource::Missing, _) => log::warn!("[SETTINGS] No {} set", API_KEY_ENV),
        _ => {}
    }
    key
}

// ── Tauri commands ───────────────────────────────────────────────────

/// Tauri command: report where the API key would come from.
///
/// Lets the frontend warn before an upload instead of after a failed call.
#[cfg_attr(feature = "desktop", tauri::command)]
pub fn get_credential_status() -> CredentialStatus {
    let (source, _) = pick_key(std::env::var(API_KEY_ENV).ok(), keychain_key);
    CredentialStatus {
        source,
        model: FortuneConfig::from_env().model,
    }
}

fn store_key(api_key: &str) -> crate::Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)?;
    entry.set_password(api_key)?;
    Ok(())
}

/// Tauri command: save the API key to the OS keychain and the current env.
#[cfg_attr(feature = "desktop", tauri::command)]
pub fn save_api_key(api_key: String) -> Result<(), String> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err("API key is empty".to_string());
    }

    store_key(api_key).map_err(|e| e.to_string())?;
    std::env::set_var(API_KEY_ENV, api_key);
    log::info!("[SETTINGS] Gemini API key saved");
    Ok(())
}

/// Tauri command: send a tiny text-only request to check the key works.
#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn test_connection() -> Result<bool, String> {
    let key = resolve_api_key().ok_or_else(|| format!("No {} set", API_KEY_ENV))?;
    check_connection(&reqwest::Client::new(), &FortuneConfig::from_env(), &key).await
}

async fn check_connection(
    client: &reqwest::Client,
    config: &FortuneConfig,
    key: &str,
) -> Result<bool, String> {
    let resp = client
        .post(endpoint(config))
        .header(API_KEY_HEADER, key)
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": "Reply with just: ok"}]}],
            "generationConfig": {"maxOutputTokens": 10}
        }))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    log::info!("[SETTINGS] Test gemini status: {}", resp.status());
    Ok(resp.status().is_success())
}
