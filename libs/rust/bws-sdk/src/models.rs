//! Wire models for projects, secrets, and bulk deletes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Secrets Manager project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project id
    pub id: String,
    /// Owning organization
    pub organization_id: String,
    /// Display name
    pub name: String,
    /// Creation time
    pub creation_date: DateTime<Utc>,
    /// Time of the last change
    pub revision_date: DateTime<Utc>,
}

/// A secret, optionally attached to one project.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// Secret id
    pub id: String,
    /// Owning organization
    pub organization_id: String,
    /// Project the secret belongs to, if any
    #[serde(default)]
    pub project_id: Option<String>,
    /// Secret name
    pub key: String,
    /// Secret value
    pub value: String,
    /// Free-form note
    #[serde(default)]
    pub note: String,
    /// Creation time
    pub creation_date: DateTime<Utc>,
    /// Time of the last change
    pub revision_date: DateTime<Utc>,
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("id", &self.id)
            .field("organization_id", &self.organization_id)
            .field("project_id", &self.project_id)
            .field("key", &self.key)
            .field("value", &"[REDACTED]")
            .field("creation_date", &self.creation_date)
            .field("revision_date", &self.revision_date)
            .finish_non_exhaustive()
    }
}

/// Body for creating a secret. The organization goes in the URL.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretCreateRequest {
    #[serde(skip)]
    /// Organization to create the secret in
    pub organization_id: String,
    /// Secret name
    pub key: String,
    /// Secret value
    pub value: String,
    /// Free-form note
    pub note: String,
    /// Projects to attach the secret to
    pub project_ids: Vec<String>,
}

/// Body for replacing a secret. The id goes in the URL.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretPutRequest {
    #[serde(skip)]
    /// Secret to replace
    pub id: String,
    /// Owning organization
    pub organization_id: String,
    /// Secret name
    pub key: String,
    /// Secret value
    pub value: String,
    /// Free-form note
    pub note: String,
    /// Projects to attach the secret to
    pub project_ids: Vec<String>,
}

impl fmt::Debug for SecretCreateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretCreateRequest")
            .field("organization_id", &self.organization_id)
            .field("key", &self.key)
            .field("value", &"[REDACTED]")
            .field("project_ids", &self.project_ids)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for SecretPutRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretPutRequest")
            .field("id", &self.id)
            .field("organization_id", &self.organization_id)
            .field("key", &self.key)
            .field("value", &"[REDACTED]")
            .field("project_ids", &self.project_ids)
            .finish_non_exhaustive()
    }
}

/// Result of a bulk delete. The call can succeed while individual items fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// One entry per requested id
    pub data: Vec<DeleteResult>,
}

/// Per-item outcome of a bulk delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    /// Requested id
    pub id: String,
    /// Failure reason; `None` means the object was deleted
    #[serde(default)]
    pub error: Option<String>,
}

impl DeleteResponse {
    /// Build a response where every id was deleted.
    #[must_use]
    pub fn succeeded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: ids
                .into_iter()
                .map(|id| DeleteResult {
                    id: id.into(),
                    error: None,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_from_api_json() {
        let project: Project = serde_json::from_value(json!({
            "id": "abc",
            "organizationId": "org1",
            "name": "example",
            "creationDate": "2024-01-01T00:00:00Z",
            "revisionDate": "2024-01-02T10:30:00Z"
        }))
        .unwrap();

        assert_eq!(project.id, "abc");
        assert_eq!(project.organization_id, "org1");
        assert_eq!(project.revision_date.to_rfc3339(), "2024-01-02T10:30:00+00:00");
    }

    #[test]
    fn test_secret_create_request_body() {
        let request = SecretCreateRequest {
            organization_id: "org1".to_string(),
            key: "DB_PASSWORD".to_string(),
            value: "hunter2".to_string(),
            note: String::new(),
            project_ids: vec!["p1".to_string()],
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({"key": "DB_PASSWORD", "value": "hunter2", "note": "", "projectIds": ["p1"]})
        );
    }

    #[test]
    fn test_delete_response_with_item_error() {
        let response: DeleteResponse = serde_json::from_value(json!({
            "data": [{"id": "abc", "error": "Project not found"}]
        }))
        .unwrap();

        assert_eq!(response.data[0].error.as_deref(), Some("Project not found"));
    }

    #[test]
    fn test_delete_response_succeeded() {
        let response = DeleteResponse::succeeded(["a", "b"]);
        assert_eq!(response.data.len(), 2);
        assert!(response.data.iter().all(|r| r.error.is_none()));
    }
}
