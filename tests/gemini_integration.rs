//! Integration test against the real Gemini API.
//!
//! Sends a tiny generated PNG through the full request path. Skips when no
//! GEMINI_API_KEY is available.
//!
//! Loads the API key from .env.local using dotenvy, same as the app.
//! Run with: GEMINI_API_KEY=... cargo test --test gemini_integration

use coffee_fortune_lib::capture;
use coffee_fortune_lib::llm::{FortuneBackend, FortuneRequest, GeminiBackend};
use coffee_fortune_lib::render;
use coffee_fortune_lib::session::Mood;

fn load_env() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    match coffee_fortune_lib::config::load_env_files(root) {
        Some(Ok(path)) => eprintln!("[TEST] Loaded {}", path.display()),
        Some(Err(e)) => eprintln!("[TEST] Failed to load {}", e),
        None => eprintln!("[TEST] No .env.local or .env at {}", root.display()),
    }
}

fn has_api_key() -> bool {
    std::env::var("GEMINI_API_KEY")
        .map(|k| !k.is_empty())
        .unwrap_or(false)
}

/// A 64x64 brown disc on a cream background, encoded as PNG in memory.
fn cup_png() -> Vec<u8> {
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        let (dx, dy) = (x as i32 - 32, y as i32 - 32);
        if dx * dx + dy * dy < 24 * 24 {
            image::Rgb([92, 58, 33])
        } else {
            image::Rgb([240, 230, 215])
        }
    });
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("PNG encode");
    bytes
}

#[tokio::test]
async fn test_gemini_returns_markdown_reading() {
    load_env();
    if !has_api_key() {
        eprintln!("SKIP: No GEMINI_API_KEY");
        return;
    }

    let image = capture::encode_upload(&cup_png(), "cup.png").unwrap();
    assert_eq!(image.mime_type(), "image/png");
    let request = FortuneRequest::new(&image, Mood::Love, "turning 30 soon");

    let start = std::time::Instant::now();
    let text = GeminiBackend::new()
        .generate(&request)
        .await
        .expect("Gemini call failed");
    eprintln!("[TEST] Gemini returned {} chars in {}ms", text.len(), start.elapsed().as_millis());

    assert!(text.len() > 50, "Reading too short: {}", text);
    let html = render::render_markdown(&text);
    assert!(!html.to_lowercase().contains("<script"));
    assert!(
        html.contains("<h1>") || html.contains("<h2>") || html.contains("<strong>"),
        "Expected some markdown structure in: {}",
        html
    );
}
