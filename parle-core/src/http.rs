//! Shared HTTP client utilities
//!
//! This module provides a shared, lazily-initialized HTTP client for upstream
//! API calls. Using a single client allows connection pooling, and its request
//! timeout bounds how long a hung upstream call can block a caller.

use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;

/// Default HTTP timeout for generation requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Global HTTP client for upstream API calls
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared HTTP client
pub fn get_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(concat!("parlegpt-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client - this should never fail")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_client_returns_same_instance() {
        let client1 = get_client();
        let client2 = get_client();
        assert!(std::ptr::eq(client1, client2));
    }
}
