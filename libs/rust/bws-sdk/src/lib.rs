//! Bitwarden Secrets Manager client for the Terraform provider.
//!
//! Exposes the project and secret APIs as object-safe traits so resource
//! adapters can hold a shared `Arc<dyn SecretsManagerClient>`, plus a
//! reqwest-backed implementation that authenticates with a machine-account
//! access token.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use api::{ProjectsApi, SecretsApi, SecretsManagerClient};
pub use auth::AccessToken;
pub use client::HttpClient;
pub use config::ClientConfig;
pub use error::{SdkError, SdkResult};
pub use models::{
    DeleteResponse, DeleteResult, Project, Secret, SecretCreateRequest, SecretPutRequest,
};
