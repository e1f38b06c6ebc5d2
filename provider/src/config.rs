//! Provider connection configuration.

/// Environment variable naming the provider API base URL.
pub const ENV_API_URL: &str = "PLATFORM_API_URL";

/// Environment variable carrying the bearer token, if the provider
/// requires one.
pub const ENV_API_TOKEN: &str = "PLATFORM_API_TOKEN";

/// Default base URL for a locally running provider endpoint.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8732";

/// Connection parameters for the remote resource store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL of the provider API, without a trailing slash.
    pub base_url: String,
    /// Optional bearer token sent on every request.
    pub api_token: Option<String>,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_token,
        }
    }

    /// Read the connection parameters from the process environment.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_token = std::env::var(ENV_API_TOKEN).ok().filter(|t| !t.is_empty());
        Self::new(base_url, api_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let cfg = ProviderConfig::new("https://api.example.com/", None);
        assert_eq!(cfg.base_url, "https://api.example.com");
        let cfg = ProviderConfig::new("https://api.example.com///", None);
        assert_eq!(cfg.base_url, "https://api.example.com");
    }
}
