pub mod content_service;
pub mod gemini;
pub mod prompts;

pub use content_service::ContentService;
pub use gemini::GeminiClient;
