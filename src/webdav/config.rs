use std::time::Duration;

use url::Url;

use crate::errors::DavError;
use crate::models::MountSecrets;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Authentication mode for a mount. Exactly one mode is active for the
/// lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Bearer <token>`
    Bearer { token: String },
    /// `Authorization: Basic base64("apikey:" + key)`
    ApiKey { key: String },
    None,
}

impl Credentials {
    /// Selects the active mode from whatever the secret store holds.
    /// A bearer token wins over an API key when both are present.
    pub fn from_secrets(api_key: Option<String>, access_token: Option<String>) -> Self {
        match access_token {
            Some(token) if !token.is_empty() => Credentials::Bearer { token },
            _ => match api_key {
                Some(key) if !key.is_empty() => Credentials::ApiKey { key },
                _ => Credentials::None,
            },
        }
    }
}

/// Immutable configuration of a mounted WebDAV collection.
///
/// Created once when a connection is established and never mutated;
/// reconfiguration means tearing the mount down and building a new one.
/// `base_url` and `prefix` never carry a trailing slash, so the request
/// path is always exactly `base_url + prefix + virtual_path`.
#[derive(Debug, Clone)]
pub struct MountConfig {
    pub base_url: String,
    pub prefix: String,
    pub credentials: Credentials,
    pub timeout_seconds: u64,
}

impl MountConfig {
    /// Creates a validated configuration. Fails with `InvalidConfiguration`
    /// before any request is attempted when `base_url` is not a syntactically
    /// valid http/https URL.
    pub fn new(
        base_url: &str,
        prefix: Option<&str>,
        credentials: Credentials,
    ) -> Result<Self, DavError> {
        validate_url(base_url)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            prefix: prefix.unwrap_or("").trim_end_matches('/').to_string(),
            credentials,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        })
    }

    /// Builds a configuration from the payload the host's secret storage
    /// supplies at mount time.
    pub fn from_secrets(secrets: &MountSecrets) -> Result<Self, DavError> {
        let credentials =
            Credentials::from_secrets(secrets.api_key.clone(), secrets.access_token.clone());
        Self::new(&secrets.webdav_url, secrets.prefix.as_deref(), credentials)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn validate_url(raw: &str) -> Result<(), DavError> {
    let parsed = Url::parse(raw)
        .map_err(|e| DavError::invalid_configuration(format!("invalid WebDAV URL '{}': {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DavError::invalid_configuration(format!(
            "unsupported URL scheme '{}': only http and https are allowed",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_stripped() {
        let config = MountConfig::new(
            "https://dav.example.com/",
            Some("/remote/webdav/"),
            Credentials::None,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://dav.example.com");
        assert_eq!(config.prefix, "/remote/webdav");
    }

    #[test]
    fn test_missing_prefix_becomes_empty() {
        let config = MountConfig::new("http://localhost:9190", None, Credentials::None).unwrap();
        assert_eq!(config.prefix, "");
    }

    #[test]
    fn test_rejects_malformed_url() {
        let err = MountConfig::new("not a url", None, Credentials::None).unwrap_err();
        assert!(matches!(err, DavError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = MountConfig::new("ftp://dav.example.com", None, Credentials::None).unwrap_err();
        assert!(matches!(err, DavError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_bearer_token_wins_over_api_key() {
        let credentials = Credentials::from_secrets(
            Some("key123".to_string()),
            Some("token456".to_string()),
        );
        assert_eq!(
            credentials,
            Credentials::Bearer {
                token: "token456".to_string()
            }
        );
    }

    #[test]
    fn test_api_key_used_when_no_token() {
        let credentials = Credentials::from_secrets(Some("key123".to_string()), None);
        assert_eq!(
            credentials,
            Credentials::ApiKey {
                key: "key123".to_string()
            }
        );
    }

    #[test]
    fn test_empty_secrets_mean_no_auth() {
        let credentials = Credentials::from_secrets(Some("".to_string()), Some("".to_string()));
        assert_eq!(credentials, Credentials::None);
    }

    #[test]
    fn test_from_secrets_validates_url() {
        let secrets = MountSecrets {
            webdav_url: "garbage".to_string(),
            ..Default::default()
        };
        assert!(MountConfig::from_secrets(&secrets).is_err());
    }
}
