/// Default generation model used when GEMINI_MODEL env var is not set
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Application configuration from environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API credential. Absent means every relay call fails closed.
    pub api_key: Option<String>,
    pub model: String,
}

impl Config {
    /// Load configuration from .env file and environment
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Not an error if .env is missing

        // No fallback credential: a missing or empty GOOGLE_API_KEY leaves
        // the relay unconfigured instead of embedding a key in the binary.
        let api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self { api_key, model }
    }
}
