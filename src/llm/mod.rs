//! LLM domain: the one outbound generation call.
//!
//! External code should only use the items exported here.
//!
//!   - prompts.rs  - persona + per-reading instruction text
//!   - types.rs    - `FortuneRequest` payload
//!   - provider.rs - `FortuneBackend` trait
//!   - gemini.rs   - Google Gemini implementation

pub mod gemini;
pub mod prompts;
pub mod provider;
pub mod types;

pub use gemini::GeminiBackend;
pub use provider::FortuneBackend;
pub use types::{FortuneRequest, InlineImage};
