//! Concrete generation backend implementations

pub mod gemini;
pub mod qwen;

pub use gemini::GeminiBackend;
pub use qwen::QwenBackend;
