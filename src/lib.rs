//! Coffee Fortune: upload a coffee cup photo, get a reading.
//!
//! The core (capture, session, llm, render, share, pipeline) has no UI
//! dependency. The Tauri shell in `run()` and `commands.rs` is compiled with
//! the `desktop` feature:
//!   - commands.rs           - session + upload + share commands
//!   - settings_commands.rs  - API key resolution, save, connection test

pub mod capture;
#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod render;
pub mod session;
pub mod settings_commands;
pub mod share;

pub use error::{FortuneError, Result};

/// Entry point, called by Tauri runtime.
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // CARGO_MANIFEST_DIR is the compile-time crate root, so .env files are
    // found regardless of the binary's working directory. Loaded before the
    // logger so RUST_LOG from .env applies.
    let env_load = config::load_env_files(std::path::Path::new(env!("CARGO_MANIFEST_DIR")));

    env_logger::init();

    match env_load {
        Some(Ok(path)) => log::info!("[STARTUP] Loaded {}", path.display()),
        Some(Err(e)) => log::warn!("[STARTUP] Failed to load {}", e),
        None => log::info!("[STARTUP] No .env.local or .env found"),
    }

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(session::SessionStore::new())
        .manage(llm::GeminiBackend::new())
        .invoke_handler(tauri::generate_handler![
            commands::get_view,
            commands::select_mood,
            commands::set_note,
            commands::reset_session,
            commands::upload_image,
            commands::pick_image,
            commands::share_fortune,
            settings_commands::get_credential_status,
            settings_commands::save_api_key,
            settings_commands::test_connection,
        ])
        .setup(|_app| {
            let status = settings_commands::get_credential_status();
            log::info!(
                "Coffee Fortune starting up (model={}, key source={:?})",
                status.model,
                status.source
            );
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("Error running Coffee Fortune");
}
