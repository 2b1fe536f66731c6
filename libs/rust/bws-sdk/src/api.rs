//! Client traits consumed by the resource adapters.

use async_trait::async_trait;

use crate::error::SdkResult;
use crate::models::{DeleteResponse, Project, Secret, SecretCreateRequest, SecretPutRequest};

/// Project operations.
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// Create a project in an organization.
    async fn create(&self, organization_id: &str, name: &str) -> SdkResult<Project>;

    /// Fetch a project by id.
    async fn get(&self, id: &str) -> SdkResult<Project>;

    /// Rename a project.
    async fn update(&self, id: &str, organization_id: &str, name: &str) -> SdkResult<Project>;

    /// Delete projects; per-item failures are reported in the response.
    async fn delete(&self, ids: &[String]) -> SdkResult<DeleteResponse>;
}

/// Secret operations.
#[async_trait]
pub trait SecretsApi: Send + Sync {
    /// Create a secret.
    async fn create(&self, request: &SecretCreateRequest) -> SdkResult<Secret>;

    /// Fetch a secret by id.
    async fn get(&self, id: &str) -> SdkResult<Secret>;

    /// Replace a secret's key, value, note and project.
    async fn update(&self, request: &SecretPutRequest) -> SdkResult<Secret>;

    /// Delete secrets; per-item failures are reported in the response.
    async fn delete(&self, ids: &[String]) -> SdkResult<DeleteResponse>;
}

/// A configured Secrets Manager client, shared by every resource adapter.
pub trait SecretsManagerClient: Send + Sync {
    /// Project API.
    fn projects(&self) -> &dyn ProjectsApi;

    /// Secret API.
    fn secrets(&self) -> &dyn SecretsApi;
}
