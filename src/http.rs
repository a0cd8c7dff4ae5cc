// src/http.rs
// Shared HTTP client for all network operations

use std::time::Duration;

/// Default request timeout (covers one full generation round-trip)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Create the shared HTTP client with appropriate defaults.
///
/// Created once at startup and passed to every module that needs HTTP
/// access. Uses connection pooling internally.
pub fn create_shared_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(4)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_shared_client() {
        let client = create_shared_client();
        drop(client);
    }

    #[test]
    fn test_timeout_values() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(120));
        assert_eq!(CONNECT_TIMEOUT, Duration::from_secs(10));
    }
}
