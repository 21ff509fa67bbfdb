mod client;
mod error;
mod parse;
mod prompt;

pub use client::{DraftEngine, EngineSettings, GeminiEngine};
pub use error::AiError;
pub use parse::parse_draft;
pub use prompt::{generation_prompt, refinement_prompt, DEFAULT_TONE_INSTRUCTION};
