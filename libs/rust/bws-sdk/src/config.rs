//! Client configuration.

use bws_common::HttpConfig;
use std::time::Duration;
use url::Url;

use crate::error::{SdkError, SdkResult};

/// Default Secrets Manager API base URL.
pub const DEFAULT_API_URL: &str = "https://api.bitwarden.com";
/// Default identity server base URL.
pub const DEFAULT_IDENTITY_URL: &str = "https://identity.bitwarden.com";

/// Secrets Manager client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL
    pub api_url: Url,
    /// Identity server base URL
    pub identity_url: Url,
    /// Underlying HTTP client settings
    pub http: HttpConfig,
    /// Bearer tokens are refreshed once they are this close to expiry
    pub refresh_margin: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::InvalidConfig`] if an endpoint is not an absolute
    /// http(s) URL that can carry a path.
    pub fn new(api_url: &str, identity_url: &str) -> SdkResult<Self> {
        Ok(Self {
            api_url: parse_endpoint("api_url", api_url)?,
            identity_url: parse_endpoint("identity_url", identity_url)?,
            http: HttpConfig::default(),
            refresh_margin: Duration::from_secs(60),
        })
    }

    /// Configuration for the Bitwarden cloud endpoints.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in endpoints; the `Result` mirrors [`ClientConfig::new`].
    pub fn bitwarden_cloud() -> SdkResult<Self> {
        Self::new(DEFAULT_API_URL, DEFAULT_IDENTITY_URL)
    }

    /// Replace the HTTP settings.
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Set the token refresh margin.
    #[must_use]
    pub const fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// API URL for `segments` under the API base.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::InvalidId`] if a segment is empty, `.` or `..`.
    pub fn api_endpoint(&self, segments: &[&str]) -> SdkResult<Url> {
        join_segments(&self.api_url, segments)
    }

    /// Identity server URL for `segments` under the identity base.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::InvalidId`] if a segment is empty, `.` or `..`.
    pub fn identity_endpoint(&self, segments: &[&str]) -> SdkResult<Url> {
        join_segments(&self.identity_url, segments)
    }
}

fn parse_endpoint(field: &str, value: &str) -> SdkResult<Url> {
    let url = Url::parse(value.trim()).map_err(|e| {
        SdkError::InvalidConfig(format!("{field} is not a valid URL ({e}): {value:?}"))
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(SdkError::InvalidConfig(format!(
            "{field} must be an http(s) URL, got {value:?}"
        )));
    }
    Ok(url)
}

/// Each segment is percent-encoded on its own, so `/`, `?` and `#` inside an
/// id never change which endpoint is addressed.
fn join_segments(base: &Url, segments: &[&str]) -> SdkResult<Url> {
    if let Some(bad) = segments
        .iter()
        .find(|s| s.is_empty() || **s == "." || **s == "..")
    {
        return Err(SdkError::InvalidId((*bad).to_string()));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| SdkError::InvalidConfig(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitwarden_cloud_config() {
        let config = ClientConfig::bitwarden_cloud().unwrap();
        assert_eq!(config.api_url.as_str(), "https://api.bitwarden.com/");
        assert_eq!(config.identity_url.host_str(), Some("identity.bitwarden.com"));
        assert_eq!(config.refresh_margin, Duration::from_secs(60));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config =
            ClientConfig::new("https://sm.example.com/api/", "https://sm.example.com/identity")
                .unwrap();

        assert_eq!(
            config.api_endpoint(&["projects", "abc"]).unwrap().as_str(),
            "https://sm.example.com/api/projects/abc"
        );
        assert_eq!(
            config.identity_endpoint(&["connect", "token"]).unwrap().as_str(),
            "https://sm.example.com/identity/connect/token"
        );
    }

    #[test]
    fn test_endpoint_encodes_path_syntax_in_ids() {
        let config = ClientConfig::bitwarden_cloud().unwrap();

        let url = config.api_endpoint(&["projects", "../secrets/s1"]).unwrap();
        assert_eq!(url.path(), "/projects/..%2Fsecrets%2Fs1");

        let url = config.api_endpoint(&["secrets", "a?b#c"]).unwrap();
        assert_eq!(url.path(), "/secrets/a%3Fb%23c");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_endpoint_rejects_dot_segments() {
        let config = ClientConfig::bitwarden_cloud().unwrap();

        for id in ["", ".", ".."] {
            let err = config.api_endpoint(&["projects", id]).unwrap_err();
            assert!(matches!(err, SdkError::InvalidId(_)), "{id:?}");
        }
    }

    #[test]
    fn test_new_rejects_non_http() {
        let err = ClientConfig::new("sm.example.com", DEFAULT_IDENTITY_URL).unwrap_err();
        assert!(matches!(err, SdkError::InvalidConfig(_)));
        assert!(err.to_string().contains("api_url"));

        let err = ClientConfig::new(DEFAULT_API_URL, "ftp://sm.example.com").unwrap_err();
        assert!(err.to_string().contains("identity_url"));
    }
}
