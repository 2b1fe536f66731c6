//! Machine-account access tokens and identity server responses.
//!
//! An access token has the shape `0.<client_id>.<client_secret>:<encryption_key>`.
//! Only the client credentials are used for login; the encryption key is kept
//! so callers that decrypt payloads can reach it.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::SdkError;

const SUPPORTED_VERSION: &str = "0";

/// Parsed machine-account access token.
#[derive(Clone)]
pub struct AccessToken {
    client_id: String,
    client_secret: SecretString,
    encryption_key: SecretString,
}

impl AccessToken {
    /// Client id used as the OAuth `client_id`.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Client secret used as the OAuth `client_secret`.
    #[must_use]
    pub const fn client_secret(&self) -> &SecretString {
        &self.client_secret
    }

    /// Encryption key carried after the `:` separator.
    #[must_use]
    pub const fn encryption_key(&self) -> &SecretString {
        &self.encryption_key
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("encryption_key", &"[REDACTED]")
            .finish()
    }
}

impl FromStr for AccessToken {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (credentials, encryption_key) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| SdkError::invalid_token("missing encryption key"))?;

        let mut parts = credentials.split('.');
        let (Some(version), Some(client_id), Some(client_secret), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(SdkError::invalid_token(
                "expected <version>.<client_id>.<client_secret>",
            ));
        };

        if version != SUPPORTED_VERSION {
            return Err(SdkError::invalid_token(format!(
                "unsupported version {version:?}"
            )));
        }
        if client_id.is_empty() || client_secret.is_empty() || encryption_key.is_empty() {
            return Err(SdkError::invalid_token("token has empty components"));
        }

        Ok(Self {
            client_id: client_id.to_string(),
            client_secret: SecretString::from(client_secret.to_string()),
            encryption_key: SecretString::from(encryption_key.to_string()),
        })
    }
}

/// Form body for the client-credentials grant.
pub(crate) fn login_form(token: &AccessToken) -> [(&'static str, String); 4] {
    [
        ("scope", "api.secrets".to_string()),
        ("client_id", token.client_id.clone()),
        ("client_secret", token.client_secret.expose_secret().to_string()),
        ("grant_type", "client_credentials".to_string()),
    ]
}

/// Identity server token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for API calls
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: u64,
    /// Usually `Bearer`
    #[serde(default)]
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str =
        "0.ec2c1d46-6a4b-4751-a310-af9601317f2d.C2IgxjjLF7qSshsbwe8JGcbM075YXw:X8vbvA0bduihIDe/qrzIQQ==";

    #[test]
    fn test_parse_valid_token() {
        let token: AccessToken = TOKEN.parse().unwrap();
        assert_eq!(token.client_id(), "ec2c1d46-6a4b-4751-a310-af9601317f2d");
        assert_eq!(token.client_secret().expose_secret(), "C2IgxjjLF7qSshsbwe8JGcbM075YXw");
        assert_eq!(token.encryption_key().expose_secret(), "X8vbvA0bduihIDe/qrzIQQ==");
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        let err = "0.client.secret".parse::<AccessToken>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid access token: missing encryption key");
    }

    #[test]
    fn test_parse_rejects_unknown_version() {
        let err = "1.client.secret:key".parse::<AccessToken>().unwrap_err();
        assert!(err.to_string().contains("unsupported version"));
    }

    #[test]
    fn test_parse_rejects_extra_segments() {
        assert!("0.a.b.c:key".parse::<AccessToken>().is_err());
        assert!("0.a:key".parse::<AccessToken>().is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let token: AccessToken = TOKEN.parse().unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("C2IgxjjLF7qSshsbwe8JGcbM075YXw"));
        assert!(!debug.contains("X8vbvA0bduihIDe"));
        assert!(debug.contains("ec2c1d46"));
    }

    #[test]
    fn test_login_form_fields() {
        let token: AccessToken = TOKEN.parse().unwrap();
        let form = login_form(&token);
        assert_eq!(form[0], ("scope", "api.secrets".to_string()));
        assert_eq!(form[3], ("grant_type", "client_credentials".to_string()));
    }
}
