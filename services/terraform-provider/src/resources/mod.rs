//! Resource adapters.

use bws_sdk::SecretsManagerClient;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::framework::{ConfigureRequest, ConfigureResponse, Diagnostics, Resource};
use crate::provider::ProviderData;

pub mod project;
pub mod secret;

pub use project::{ProjectResource, ProjectResourceModel};
pub use secret::{SecretResource, SecretResourceModel};

/// Factory for the `project` resource.
#[must_use]
pub fn new_project_resource() -> Box<dyn Resource> {
    Box::new(ProjectResource::default())
}

/// Factory for the `secret` resource.
#[must_use]
pub fn new_secret_resource() -> Box<dyn Resource> {
    Box::new(SecretResource::default())
}

/// Client handle and organization captured at configure time.
#[derive(Clone)]
pub(crate) struct ResourceContext {
    pub(crate) client: Arc<dyn SecretsManagerClient>,
    pub(crate) organization_id: String,
}

impl fmt::Debug for ResourceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceContext")
            .field("organization_id", &self.organization_id)
            .finish_non_exhaustive()
    }
}

/// Validate provider data for a resource; `None` leaves the resource unconfigured.
pub(crate) fn configure_context(
    kind: &str,
    req: &ConfigureRequest,
    resp: &mut ConfigureResponse,
) -> Option<ResourceContext> {
    info!(resource = kind, "Configuring resource");

    // The host configures resources before the provider block is known.
    let Some(data) = req.provider_data.as_ref() else {
        debug!(
            resource = kind,
            "Skipping resource configuration because the provider has not been configured yet"
        );
        return None;
    };

    let Some(data) = data.downcast_ref::<ProviderData>() else {
        resp.diagnostics.add_error(
            "Unexpected Resource Configure Type",
            "Expected ProviderData, got an unrecognized type. Please report this issue to the provider developers.",
        );
        return None;
    };

    let Some(client) = data.client.clone() else {
        resp.diagnostics.add_error(
            "Client Not Initialized",
            "The Bitwarden client was not properly initialized due to a missing Bitwarden API Client.",
        );
        return None;
    };

    if data.organization_id.is_empty() {
        resp.diagnostics.add_error(
            "Client Not Initialized",
            "The Bitwarden client was not properly initialized due to an empty Organization ID.",
        );
        return None;
    }

    info!(resource = kind, "Resource configured");
    Some(ResourceContext {
        client,
        organization_id: data.organization_id.clone(),
    })
}

/// The configured context, or a "Client Not Initialized" error.
pub(crate) fn require_context<'a>(
    context: Option<&'a ResourceContext>,
    diagnostics: &mut Diagnostics,
) -> Option<&'a ResourceContext> {
    if context.is_none() {
        diagnostics.add_error(
            "Client Not Initialized",
            "The Bitwarden client was not properly initialized.",
        );
    }
    context
}

pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
