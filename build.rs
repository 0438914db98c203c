//! Build script for the Coffee Fortune Tauri app.
//!
//! Only the desktop shell needs generated code; headless builds of the core
//! skip it entirely.

fn main() {
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
