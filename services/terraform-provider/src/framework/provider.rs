//! Provider-level callbacks.

use async_trait::async_trait;

use super::diagnostics::Diagnostics;
use super::resource::{ProviderDataHandle, Resource};
use super::schema::Schema;
use super::state::State;

/// Builds a fresh, unconfigured resource.
pub type ResourceFactory = fn() -> Box<dyn Resource>;

/// Response for [`Provider::metadata`].
#[derive(Debug, Clone, Default)]
pub struct ProviderMetadataResponse {
    /// Provider type name, the prefix of every resource type
    pub type_name: String,
    /// Provider version
    pub version: String,
}

/// Request for [`Provider::configure`].
#[derive(Debug, Clone, Default)]
pub struct ProviderConfigureRequest {
    /// Provider block configuration
    pub config: State,
}

/// Response for [`Provider::configure`].
#[derive(Debug, Clone, Default)]
pub struct ProviderConfigureResponse {
    /// Passed to every resource's `configure`
    pub resource_data: Option<ProviderDataHandle>,
    /// Diagnostics
    pub diagnostics: Diagnostics,
}

/// A provider: configuration plus the resources it offers.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Report the provider type name and version.
    fn metadata(&self, resp: &mut ProviderMetadataResponse);

    /// Declare the provider block schema.
    fn schema(&self) -> Schema;

    /// Configure shared clients from the provider block.
    async fn configure(&self, req: &ProviderConfigureRequest, resp: &mut ProviderConfigureResponse);

    /// Resources offered by this provider.
    fn resources(&self) -> Vec<ResourceFactory>;
}
