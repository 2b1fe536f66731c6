//! The `bitwarden-secrets` provider.

use async_trait::async_trait;
use bws_sdk::{HttpClient, SdkResult, SecretsManagerClient};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::config::{ClientSettings, EnvLookup, ProviderModel};
use crate::framework::{
    Attribute, Provider, ProviderConfigureRequest, ProviderConfigureResponse,
    ProviderMetadataResponse, ResourceFactory, Schema,
};
use crate::resources::{new_project_resource, new_secret_resource};

/// Provider type name; resource types are `bitwarden-secrets_<kind>`.
pub const PROVIDER_TYPE_NAME: &str = "bitwarden-secrets";

/// Data published to resources once the provider is configured.
#[derive(Clone)]
pub struct ProviderData {
    /// Shared client; `None` means client construction did not happen
    pub client: Option<Arc<dyn SecretsManagerClient>>,
    /// Organization owning every managed object
    pub organization_id: String,
}

impl fmt::Debug for ProviderData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderData")
            .field("client", &self.client.as_ref().map(|_| "SecretsManagerClient"))
            .field("organization_id", &self.organization_id)
            .finish()
    }
}

/// Builds the shared client from resolved settings.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Build and authenticate a client.
    async fn connect(&self, settings: &ClientSettings) -> SdkResult<Arc<dyn SecretsManagerClient>>;
}

/// Default factory: an [`HttpClient`] that logs in before it is handed out.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpClientFactory;

#[async_trait]
impl ClientFactory for HttpClientFactory {
    async fn connect(&self, settings: &ClientSettings) -> SdkResult<Arc<dyn SecretsManagerClient>> {
        let client = HttpClient::new(settings.client.clone(), settings.access_token.clone())?;
        client.login().await?;
        Ok(Arc::new(client))
    }
}

/// Bitwarden Secrets Manager provider.
pub struct BitwardenSecretsProvider {
    version: String,
    factory: Arc<dyn ClientFactory>,
    env: Arc<EnvLookup>,
}

impl Default for BitwardenSecretsProvider {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

impl BitwardenSecretsProvider {
    /// Create a provider that reads the process environment and talks HTTP.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            factory: Arc::new(HttpClientFactory),
            env: Arc::new(|key: &str| std::env::var(key).ok()),
        }
    }

    /// Replace the client factory.
    #[must_use]
    pub fn with_client_factory(mut self, factory: Arc<dyn ClientFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Replace the environment lookup.
    #[must_use]
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        let env: Arc<EnvLookup> = Arc::new(env);
        self.env = env;
        self
    }
}

#[async_trait]
impl Provider for BitwardenSecretsProvider {
    fn metadata(&self, resp: &mut ProviderMetadataResponse) {
        resp.type_name = PROVIDER_TYPE_NAME.to_string();
        resp.version.clone_from(&self.version);
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "Interact with Bitwarden Secrets Manager.",
            "Interact with [Bitwarden Secrets Manager](https://bitwarden.com/products/secrets-manager/).",
        )
        .with_attribute(
            "api_url",
            Attribute::optional().describe(
                "URL of the Secrets Manager API. May also be provided via the BW_API_URL environment variable.",
                "URL of the Secrets Manager API. May also be provided via the `BW_API_URL` environment variable.",
            ),
        )
        .with_attribute(
            "identity_url",
            Attribute::optional().describe(
                "URL of the identity server. May also be provided via the BW_IDENTITY_URL environment variable.",
                "URL of the identity server. May also be provided via the `BW_IDENTITY_URL` environment variable.",
            ),
        )
        .with_attribute(
            "access_token",
            Attribute::optional().sensitive().describe(
                "Machine account access token. May also be provided via the BW_ACCESS_TOKEN environment variable.",
                "Machine account access token. May also be provided via the `BW_ACCESS_TOKEN` environment variable.",
            ),
        )
        .with_attribute(
            "organization_id",
            Attribute::optional().describe(
                "ID of the organization owning managed projects and secrets. May also be provided via the BW_ORGANIZATION_ID environment variable.",
                "`ID` of the organization owning managed projects and secrets. May also be provided via the `BW_ORGANIZATION_ID` environment variable.",
            ),
        )
    }

    #[instrument(skip_all)]
    async fn configure(&self, req: &ProviderConfigureRequest, resp: &mut ProviderConfigureResponse) {
        info!("Configuring Bitwarden Secrets Manager provider");

        let Some(model) = resp.diagnostics.capture(req.config.get::<ProviderModel>()) else {
            return;
        };
        let Some(settings) = resp.diagnostics.capture(model.resolve(self.env.as_ref())) else {
            return;
        };

        let client = match self.factory.connect(&settings).await {
            Ok(client) => client,
            Err(err) => {
                error!(error = %err, "Unable to create Secrets Manager client");
                resp.diagnostics.add_error(
                    "Unable to Create Bitwarden Client",
                    format!(
                        "An unexpected error occurred when creating the Bitwarden Secrets Manager client.\n\nError: {err}"
                    ),
                );
                return;
            }
        };

        resp.resource_data = Some(Arc::new(ProviderData {
            client: Some(client),
            organization_id: settings.organization_id,
        }));

        info!("Provider configured");
    }

    fn resources(&self) -> Vec<ResourceFactory> {
        vec![new_project_resource, new_secret_resource]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{MetadataRequest, MetadataResponse, Resource};

    #[test]
    fn test_metadata() {
        let provider = BitwardenSecretsProvider::new("1.2.3");
        let mut resp = ProviderMetadataResponse::default();
        provider.metadata(&mut resp);

        assert_eq!(resp.type_name, "bitwarden-secrets");
        assert_eq!(resp.version, "1.2.3");
    }

    #[test]
    fn test_access_token_is_sensitive() {
        let schema = BitwardenSecretsProvider::default().schema();
        assert!(schema.attribute("access_token").is_some_and(|a| a.sensitive));
        assert!(schema.attributes.values().all(|a| a.optional));
    }

    #[test]
    fn test_resource_type_names() {
        let provider = BitwardenSecretsProvider::default();
        let req = MetadataRequest {
            provider_type_name: PROVIDER_TYPE_NAME.to_string(),
        };

        let names: Vec<String> = provider
            .resources()
            .into_iter()
            .map(|factory| {
                let mut resp = MetadataResponse::default();
                factory().metadata(&req, &mut resp);
                resp.type_name
            })
            .collect();

        assert_eq!(names, vec!["bitwarden-secrets_project", "bitwarden-secrets_secret"]);
    }

    #[test]
    fn test_provider_data_debug_hides_client() {
        let data = ProviderData {
            client: None,
            organization_id: "org1".to_string(),
        };
        assert_eq!(
            format!("{data:?}"),
            r#"ProviderData { client: None, organization_id: "org1" }"#
        );
    }
}
