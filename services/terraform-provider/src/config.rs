//! Provider block configuration.
//!
//! Every attribute may also come from the environment, so a provider block
//! can be left empty in CI where credentials are injected as variables.

use bws_sdk::config::{DEFAULT_API_URL, DEFAULT_IDENTITY_URL};
use bws_sdk::{AccessToken, ClientConfig};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::framework::Diagnostics;

/// Environment variable for `api_url`.
pub const ENV_API_URL: &str = "BW_API_URL";
/// Environment variable for `identity_url`.
pub const ENV_IDENTITY_URL: &str = "BW_IDENTITY_URL";
/// Environment variable for `access_token`.
pub const ENV_ACCESS_TOKEN: &str = "BW_ACCESS_TOKEN";
/// Environment variable for `organization_id`.
pub const ENV_ORGANIZATION_ID: &str = "BW_ORGANIZATION_ID";

/// Environment lookup, swappable in tests.
pub type EnvLookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Provider block as written by the user.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderModel {
    /// Secrets Manager API base URL
    #[serde(default)]
    pub api_url: Option<String>,
    /// Identity server base URL
    #[serde(default)]
    pub identity_url: Option<String>,
    /// Machine-account access token
    #[serde(default)]
    pub access_token: Option<SecretString>,
    /// Organization owning every managed object
    #[serde(default)]
    pub organization_id: Option<String>,
}

/// Everything needed to build a client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Endpoints and HTTP settings
    pub client: ClientConfig,
    /// Machine-account credentials
    pub access_token: AccessToken,
    /// Organization owning every managed object
    pub organization_id: String,
}

impl ProviderModel {
    /// Fill unset attributes from the environment and defaults, then validate.
    ///
    /// # Errors
    ///
    /// Returns attribute diagnostics for a missing access token or
    /// organization id (both are reported at once), for an unparsable
    /// access token, and for an endpoint that is not an http(s) URL.
    pub fn resolve(self, env: &EnvLookup) -> Result<ClientSettings, Diagnostics> {
        let mut diags = Diagnostics::new();

        let api_url = non_empty(self.api_url)
            .or_else(|| non_empty(env(ENV_API_URL)))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let identity_url = non_empty(self.identity_url)
            .or_else(|| non_empty(env(ENV_IDENTITY_URL)))
            .unwrap_or_else(|| DEFAULT_IDENTITY_URL.to_string());

        let access_token = self
            .access_token
            .map(|t| t.expose_secret().to_string())
            .and_then(|t| non_empty(Some(t)))
            .or_else(|| non_empty(env(ENV_ACCESS_TOKEN)));
        let organization_id =
            non_empty(self.organization_id).or_else(|| non_empty(env(ENV_ORGANIZATION_ID)));

        if access_token.is_none() {
            diags.add_attribute_error(
                "access_token",
                "Missing Access Token",
                format!(
                    "Set the access_token attribute in the provider block or the {ENV_ACCESS_TOKEN} environment variable."
                ),
            );
        }
        if organization_id.is_none() {
            diags.add_attribute_error(
                "organization_id",
                "Missing Organization ID",
                format!(
                    "Set the organization_id attribute in the provider block or the {ENV_ORGANIZATION_ID} environment variable."
                ),
            );
        }

        let (Some(access_token), Some(organization_id)) = (access_token, organization_id) else {
            return Err(diags);
        };

        let access_token = match access_token.parse::<AccessToken>() {
            Ok(token) => token,
            Err(e) => {
                diags.add_attribute_error("access_token", "Invalid Access Token", e.to_string());
                return Err(diags);
            }
        };

        let client = match ClientConfig::new(&api_url, &identity_url) {
            Ok(client) => client,
            Err(e) => {
                diags.add_error("Invalid Endpoint URL", e.to_string());
                return Err(diags);
            }
        };

        Ok(ClientSettings {
            client,
            access_token,
            organization_id,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
