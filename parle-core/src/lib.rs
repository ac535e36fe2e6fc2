pub mod config;
pub mod gemini;
pub mod http;
pub mod relay;

// Re-export commonly used types
pub use config::Config;
pub use gemini::{GeminiClient, TextGenerator};
pub use relay::{ASSISTANT_NAME, PromptRelay, RelayError, SYSTEM_INSTRUCTION};
