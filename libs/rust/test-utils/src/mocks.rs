//! In-memory Secrets Manager client for tests.
//!
//! Every trait call is recorded before it is served, so tests can assert both
//! what reached the "network" and that nothing did.

use async_trait::async_trait;
use bws_sdk::{
    DeleteResponse, DeleteResult, Project, ProjectsApi, SdkError, SdkResult, Secret,
    SecretCreateRequest, SecretPutRequest, SecretsApi, SecretsManagerClient,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Client operation, used for call recording and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `ProjectsApi::create`
    CreateProject,
    /// `ProjectsApi::get`
    GetProject,
    /// `ProjectsApi::update`
    UpdateProject,
    /// `ProjectsApi::delete`
    DeleteProjects,
    /// `SecretsApi::create`
    CreateSecret,
    /// `SecretsApi::get`
    GetSecret,
    /// `SecretsApi::update`
    UpdateSecret,
    /// `SecretsApi::delete`
    DeleteSecrets,
}

/// A recorded client call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// Which operation was invoked
    pub operation: Operation,
    /// Organization id for creates, object ids otherwise
    pub target: String,
}

/// In-memory client implementing [`SecretsManagerClient`].
#[derive(Debug, Default)]
pub struct MockSecretsManagerClient {
    projects: RwLock<HashMap<String, Project>>,
    secrets: RwLock<HashMap<String, Secret>>,
    calls: RwLock<Vec<MockCall>>,
    failures: RwLock<HashMap<Operation, String>>,
    item_errors: RwLock<HashMap<String, String>>,
    empty_deletes: RwLock<bool>,
}

impl MockSecretsManagerClient {
    /// Create an empty client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call to `operation` fail with `message` until cleared.
    pub async fn fail(&self, operation: Operation, message: &str) {
        self.failures
            .write()
            .await
            .insert(operation, message.to_string());
    }

    /// Remove all injected failures.
    pub async fn clear_failures(&self) {
        self.failures.write().await.clear();
        self.item_errors.write().await.clear();
        *self.empty_deletes.write().await = false;
    }

    /// Make bulk deletes succeed with an empty result list and delete nothing.
    pub async fn return_empty_delete(&self) {
        *self.empty_deletes.write().await = true;
    }

    /// Report `message` for `id` in bulk delete results while the call succeeds.
    pub async fn fail_delete_item(&self, id: &str, message: &str) {
        self.item_errors
            .write()
            .await
            .insert(id.to_string(), message.to_string());
    }

    /// Seed a project.
    pub async fn insert_project(&self, project: Project) {
        self.projects
            .write()
            .await
            .insert(project.id.clone(), project);
    }

    /// Seed a secret.
    pub async fn insert_secret(&self, secret: Secret) {
        self.secrets.write().await.insert(secret.id.clone(), secret);
    }

    /// Look up a stored project without recording a call.
    pub async fn project(&self, id: &str) -> Option<Project> {
        self.projects.read().await.get(id).cloned()
    }

    /// Look up a stored secret without recording a call.
    pub async fn secret(&self, id: &str) -> Option<Secret> {
        self.secrets.read().await.get(id).cloned()
    }

    /// All recorded calls, in order.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.calls.read().await.clone()
    }

    /// Number of recorded calls.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    async fn record(&self, operation: Operation, target: &str) -> SdkResult<()> {
        self.calls.write().await.push(MockCall {
            operation,
            target: target.to_string(),
        });

        match self.failures.read().await.get(&operation) {
            Some(message) => Err(SdkError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn bulk_results(&self, ids: &[String], mut remove: impl FnMut(&str) -> bool) -> DeleteResponse {
        if *self.empty_deletes.read().await {
            return DeleteResponse::default();
        }

        let item_errors = self.item_errors.read().await;
        let data = ids
            .iter()
            .map(|id| {
                let error = match item_errors.get(id) {
                    Some(message) => Some(message.clone()),
                    None if remove(id) => None,
                    None => Some("Not found".to_string()),
                };
                DeleteResult {
                    id: id.clone(),
                    error,
                }
            })
            .collect();

        DeleteResponse { data }
    }
}

fn next_revision(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous + Duration::seconds(1))
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[async_trait]
impl ProjectsApi for MockSecretsManagerClient {
    async fn create(&self, organization_id: &str, name: &str) -> SdkResult<Project> {
        self.record(Operation::CreateProject, organization_id).await?;

        let now = Utc::now();
        let project = Project {
            id: new_id(),
            organization_id: organization_id.to_string(),
            name: name.to_string(),
            creation_date: now,
            revision_date: now,
        };
        self.insert_project(project.clone()).await;
        Ok(project)
    }

    async fn get(&self, id: &str) -> SdkResult<Project> {
        self.record(Operation::GetProject, id).await?;
        self.project(id)
            .await
            .ok_or_else(|| SdkError::not_found(format!("projects/{id}")))
    }

    async fn update(&self, id: &str, organization_id: &str, name: &str) -> SdkResult<Project> {
        self.record(Operation::UpdateProject, id).await?;

        let mut projects = self.projects.write().await;
        let project = projects
            .get_mut(id)
            .filter(|p| p.organization_id == organization_id)
            .ok_or_else(|| SdkError::not_found(format!("projects/{id}")))?;

        project.name = name.to_string();
        project.revision_date = next_revision(project.revision_date);
        Ok(project.clone())
    }

    async fn delete(&self, ids: &[String]) -> SdkResult<DeleteResponse> {
        self.record(Operation::DeleteProjects, &ids.join(",")).await?;

        let mut projects = self.projects.write().await;
        Ok(self
            .bulk_results(ids, |id| projects.remove(id).is_some())
            .await)
    }
}

#[async_trait]
impl SecretsApi for MockSecretsManagerClient {
    async fn create(&self, request: &SecretCreateRequest) -> SdkResult<Secret> {
        self.record(Operation::CreateSecret, &request.organization_id)
            .await?;

        let now = Utc::now();
        let secret = Secret {
            id: new_id(),
            organization_id: request.organization_id.clone(),
            project_id: request.project_ids.first().cloned(),
            key: request.key.clone(),
            value: request.value.clone(),
            note: request.note.clone(),
            creation_date: now,
            revision_date: now,
        };
        self.insert_secret(secret.clone()).await;
        Ok(secret)
    }

    async fn get(&self, id: &str) -> SdkResult<Secret> {
        self.record(Operation::GetSecret, id).await?;
        self.secret(id)
            .await
            .ok_or_else(|| SdkError::not_found(format!("secrets/{id}")))
    }

    async fn update(&self, request: &SecretPutRequest) -> SdkResult<Secret> {
        self.record(Operation::UpdateSecret, &request.id).await?;

        let mut secrets = self.secrets.write().await;
        let secret = secrets
            .get_mut(&request.id)
            .filter(|s| s.organization_id == request.organization_id)
            .ok_or_else(|| SdkError::not_found(format!("secrets/{}", request.id)))?;

        secret.key.clone_from(&request.key);
        secret.value.clone_from(&request.value);
        secret.note.clone_from(&request.note);
        secret.project_id = request.project_ids.first().cloned();
        secret.revision_date = next_revision(secret.revision_date);
        Ok(secret.clone())
    }

    async fn delete(&self, ids: &[String]) -> SdkResult<DeleteResponse> {
        self.record(Operation::DeleteSecrets, &ids.join(",")).await?;

        let mut secrets = self.secrets.write().await;
        Ok(self
            .bulk_results(ids, |id| secrets.remove(id).is_some())
            .await)
    }
}

impl SecretsManagerClient for MockSecretsManagerClient {
    fn projects(&self) -> &dyn ProjectsApi {
        self
    }

    fn secrets(&self) -> &dyn SecretsApi {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_project_lifecycle() {
        let client = MockSecretsManagerClient::new();

        let created = client.projects().create("org1", "example").await.unwrap();
        let updated = client
            .projects()
            .update(&created.id, "org1", "renamed")
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.creation_date, created.creation_date);
        assert!(updated.revision_date > created.revision_date);

        let response = client.projects().delete(&[created.id.clone()]).await.unwrap();
        assert!(response.data[0].error.is_none());
        assert!(client.project(&created.id).await.is_none());
        assert_eq!(client.call_count().await, 3);
    }

    #[tokio::test]
    async fn test_injected_failure_is_recorded() {
        let client = MockSecretsManagerClient::new();
        client.fail(Operation::GetProject, "boom").await;

        let err = client.projects().get("abc").await.unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert_eq!(
            client.calls().await,
            vec![MockCall {
                operation: Operation::GetProject,
                target: "abc".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_delete_item_error_keeps_object() {
        let client = MockSecretsManagerClient::new();
        let created = client.projects().create("org1", "example").await.unwrap();
        client.fail_delete_item(&created.id, "Project has secrets").await;

        let response = client.projects().delete(&[created.id.clone()]).await.unwrap();

        assert_eq!(response.data[0].error.as_deref(), Some("Project has secrets"));
        assert!(client.project(&created.id).await.is_some());
    }

    #[tokio::test]
    async fn test_empty_delete_keeps_object() {
        let client = MockSecretsManagerClient::new();
        let created = client.projects().create("org1", "example").await.unwrap();
        client.return_empty_delete().await;

        let response = client.projects().delete(&[created.id.clone()]).await.unwrap();

        assert!(response.data.is_empty());
        assert!(client.project(&created.id).await.is_some());

        client.clear_failures().await;
        let response = client.projects().delete(&[created.id.clone()]).await.unwrap();
        assert_eq!(response.data.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_reports_item_error() {
        let client = MockSecretsManagerClient::new();
        let response = client.secrets().delete(&["missing".to_string()]).await.unwrap();
        assert_eq!(response.data[0].error.as_deref(), Some("Not found"));
    }
}
