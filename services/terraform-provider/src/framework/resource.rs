//! Resource lifecycle callbacks.

use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

use super::diagnostics::Diagnostics;
use super::schema::Schema;
use super::state::State;

/// Opaque data the provider hands to every resource after it is configured.
pub type ProviderDataHandle = Arc<dyn Any + Send + Sync>;

/// Request for [`Resource::metadata`].
#[derive(Debug, Clone)]
pub struct MetadataRequest {
    /// The provider's type name, used as the resource type prefix
    pub provider_type_name: String,
}

/// Response for [`Resource::metadata`].
#[derive(Debug, Clone, Default)]
pub struct MetadataResponse {
    /// Full resource type name
    pub type_name: String,
}

/// Request for [`Resource::configure`].
#[derive(Debug, Clone, Default)]
pub struct ConfigureRequest {
    /// `None` until the provider itself has been configured
    pub provider_data: Option<ProviderDataHandle>,
}

/// Response for [`Resource::configure`].
#[derive(Debug, Clone, Default)]
pub struct ConfigureResponse {
    /// Diagnostics
    pub diagnostics: Diagnostics,
}

/// Request for [`Resource::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    /// Planned values
    pub plan: State,
    /// Configuration values
    pub config: State,
}

/// Response for [`Resource::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateResponse {
    /// New state
    pub state: State,
    /// Diagnostics
    pub diagnostics: Diagnostics,
}

/// Request for [`Resource::read`].
#[derive(Debug, Clone, Default)]
pub struct ReadRequest {
    /// Prior state
    pub state: State,
}

/// Response for [`Resource::read`].
#[derive(Debug, Clone, Default)]
pub struct ReadResponse {
    /// Refreshed state
    pub state: State,
    /// Diagnostics
    pub diagnostics: Diagnostics,
}

/// Request for [`Resource::update`].
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    /// Planned values
    pub plan: State,
    /// Prior state
    pub state: State,
    /// Configuration values
    pub config: State,
}

/// Response for [`Resource::update`].
#[derive(Debug, Clone, Default)]
pub struct UpdateResponse {
    /// New state
    pub state: State,
    /// Diagnostics
    pub diagnostics: Diagnostics,
}

/// Request for [`Resource::delete`].
#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    /// Prior state
    pub state: State,
}

/// Response for [`Resource::delete`].
#[derive(Debug, Clone, Default)]
pub struct DeleteResponse {
    /// Diagnostics
    pub diagnostics: Diagnostics,
}

/// Request for [`Resource::import_state`].
#[derive(Debug, Clone, Default)]
pub struct ImportStateRequest {
    /// Identifier given to `terraform import`
    pub id: String,
}

/// Response for [`Resource::import_state`].
#[derive(Debug, Clone, Default)]
pub struct ImportStateResponse {
    /// Partial state; the host follows up with a read
    pub state: State,
    /// Diagnostics
    pub diagnostics: Diagnostics,
}

/// A managed resource.
///
/// The host calls `configure` once before any lifecycle callback and may
/// then invoke callbacks concurrently, hence `&self` everywhere else.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Report the resource type name.
    fn metadata(&self, req: &MetadataRequest, resp: &mut MetadataResponse);

    /// Declare the resource schema.
    fn schema(&self) -> Schema;

    /// Receive provider data.
    async fn configure(&mut self, _req: &ConfigureRequest, _resp: &mut ConfigureResponse) {}

    /// Create the remote object from the plan.
    async fn create(&self, req: &CreateRequest, resp: &mut CreateResponse);

    /// Refresh state from the remote object.
    async fn read(&self, req: &ReadRequest, resp: &mut ReadResponse);

    /// Apply planned changes to the remote object.
    async fn update(&self, req: &UpdateRequest, resp: &mut UpdateResponse);

    /// Delete the remote object.
    async fn delete(&self, req: &DeleteRequest, resp: &mut DeleteResponse);

    /// Seed state for `terraform import`.
    async fn import_state(&self, _req: &ImportStateRequest, resp: &mut ImportStateResponse) {
        resp.diagnostics.add_error(
            "Resource Import Not Implemented",
            "This resource does not support import.",
        );
    }
}

/// Write the import identifier into `attribute` and nothing else.
pub fn import_state_passthrough_id(
    attribute: &str,
    req: &ImportStateRequest,
    resp: &mut ImportStateResponse,
) {
    if req.id.is_empty() {
        resp.diagnostics.add_error(
            "Missing Resource Import Identifier",
            format!("The import identifier for attribute {attribute:?} was empty."),
        );
        return;
    }

    let diags = resp.state.set_attribute(attribute, req.id.clone());
    resp.diagnostics.append(diags);
}
