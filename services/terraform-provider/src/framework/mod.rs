//! Host contract between the plugin server and the provider.
//!
//! The plugin server decodes protocol messages into the request types here,
//! calls the matching callback, and encodes the response. Plan, config and
//! state objects are carried as JSON values and decoded into typed models
//! by each resource.

pub mod diagnostics;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod state;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use provider::{
    Provider, ProviderConfigureRequest, ProviderConfigureResponse, ProviderMetadataResponse,
    ResourceFactory,
};
pub use resource::{
    ConfigureRequest, ConfigureResponse, CreateRequest, CreateResponse, DeleteRequest,
    DeleteResponse, ImportStateRequest, ImportStateResponse, MetadataRequest, MetadataResponse,
    ProviderDataHandle, ReadRequest, ReadResponse, Resource, UpdateRequest, UpdateResponse,
    import_state_passthrough_id,
};
pub use schema::{Attribute, PlanModifier, Schema};
pub use state::State;
