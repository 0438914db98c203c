//! Backend trait: the seam between the pipeline and the generation service.
//!
//! The app uses `GeminiBackend`; tests plug in canned backends.

use super::types::FortuneRequest;
use crate::error::Result;
use std::future::Future;

pub trait FortuneBackend {
    /// Send one request and return the narrative text.
    fn generate(&self, request: &FortuneRequest) -> impl Future<Output = Result<String>> + Send;
}
