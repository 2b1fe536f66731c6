//! Terraform provider for Bitwarden Secrets Manager.
//!
//! Provides the `project` and `secret` resources. Each resource is a thin
//! adapter: it reads the plan or prior state, makes one SDK call through the
//! client shared by the provider, and writes the response back as state.
//! Failures are reported as diagnostics on the response and never retried.
//!
//! The plugin binary installs logging once at startup, before it serves the
//! provider. The host reads its handshake from stdout, so logs go to stderr:
//!
//! ```
//! use terraform_provider_bitwarden_secrets::{TracingConfig, init_tracing};
//!
//! init_tracing(&TracingConfig::default().with_json_output());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod framework;
pub mod provider;
pub mod resources;

// Logging entry point for the plugin binary
pub use bws_common::{TracingConfig, init_tracing};
pub use provider::{
    BitwardenSecretsProvider, ClientFactory, HttpClientFactory, PROVIDER_TYPE_NAME, ProviderData,
};
pub use resources::{ProjectResource, SecretResource};
