//! The `secret` resource.

use async_trait::async_trait;
use bws_sdk::{Secret, SecretCreateRequest, SecretPutRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument};

use super::{ResourceContext, configure_context, format_timestamp, require_context};
use crate::framework::{
    Attribute, ConfigureRequest, ConfigureResponse, CreateRequest, CreateResponse, DeleteRequest,
    DeleteResponse, ImportStateRequest, ImportStateResponse, MetadataRequest, MetadataResponse,
    PlanModifier, ReadRequest, ReadResponse, Resource, Schema, UpdateRequest, UpdateResponse,
    import_state_passthrough_id,
};

/// State and plan model for `secret`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretResourceModel {
    /// Secret id, assigned by the server
    #[serde(default)]
    pub id: Option<String>,
    /// Secret name
    #[serde(default)]
    pub key: Option<String>,
    /// Secret value
    #[serde(default)]
    pub value: Option<String>,
    /// Free-form note, empty when unset
    #[serde(default)]
    pub note: Option<String>,
    /// Project the secret belongs to, if any
    #[serde(default)]
    pub project_id: Option<String>,
    /// Owning organization
    #[serde(default)]
    pub organization_id: Option<String>,
    /// RFC 3339 creation time
    #[serde(default)]
    pub creation_date: Option<String>,
    /// RFC 3339 time of the last change
    #[serde(default)]
    pub revision_date: Option<String>,
}

impl fmt::Debug for SecretResourceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretResourceModel")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("value", &self.value.as_ref().map(|_| "[REDACTED]"))
            .field("project_id", &self.project_id)
            .field("organization_id", &self.organization_id)
            .finish_non_exhaustive()
    }
}

impl SecretResourceModel {
    /// Overwrite everything except `id` with the server's view.
    fn apply(&mut self, secret: &Secret) {
        self.key = Some(secret.key.clone());
        self.value = Some(secret.value.clone());
        self.note = Some(secret.note.clone());
        self.project_id.clone_from(&secret.project_id);
        self.organization_id = Some(secret.organization_id.clone());
        self.creation_date = Some(format_timestamp(&secret.creation_date));
        self.revision_date = Some(format_timestamp(&secret.revision_date));
    }

    fn project_ids(&self) -> Vec<String> {
        self.project_id.iter().cloned().collect()
    }
}

impl From<&Secret> for SecretResourceModel {
    fn from(secret: &Secret) -> Self {
        let mut model = Self {
            id: Some(secret.id.clone()),
            ..Self::default()
        };
        model.apply(secret);
        model
    }
}

/// Manages secrets in Bitwarden Secrets Manager.
#[derive(Debug, Default)]
pub struct SecretResource {
    context: Option<ResourceContext>,
}

impl SecretResource {
    fn context(&self) -> Option<&ResourceContext> {
        self.context.as_ref()
    }
}

#[async_trait]
impl Resource for SecretResource {
    fn metadata(&self, req: &MetadataRequest, resp: &mut MetadataResponse) {
        resp.type_name = format!("{}_secret", req.provider_type_name);
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "The secret resource manages secrets in Bitwarden Secrets Manager.",
            "The `secret` resource manages secrets in Bitwarden Secrets Manager.",
        )
        .with_attribute(
            "id",
            Attribute::computed()
                .describe(
                    "String representation of the ID of the secret inside Bitwarden Secrets Manager.",
                    "String representation of the `ID` of the secret inside Bitwarden Secrets Manager.",
                )
                .plan_modifier(PlanModifier::UseStateForUnknown),
        )
        .with_attribute(
            "key",
            Attribute::required().describe(
                "String representation of the key of the secret.",
                "String representation of the `key` of the secret.",
            ),
        )
        .with_attribute(
            "value",
            Attribute::required().sensitive().describe(
                "String representation of the value of the secret.",
                "String representation of the `value` of the secret.",
            ),
        )
        .with_attribute(
            "note",
            Attribute::optional().and_computed().describe(
                "Free-form note attached to the secret.",
                "Free-form `note` attached to the secret.",
            ),
        )
        .with_attribute(
            "project_id",
            Attribute::optional().describe(
                "String representation of the ID of the project the secret belongs to.",
                "String representation of the `ID` of the project the secret belongs to.",
            ),
        )
        .with_attribute(
            "organization_id",
            Attribute::computed()
                .describe(
                    "String representation of the ID of the organization to which the secret belongs.",
                    "String representation of the `ID` of the organization to which the secret belongs.",
                )
                .plan_modifier(PlanModifier::UseStateForUnknown),
        )
        .with_attribute(
            "creation_date",
            Attribute::computed()
                .describe(
                    "String representation of the creation date of the secret.",
                    "String representation of the `creation_date` of the secret.",
                )
                .plan_modifier(PlanModifier::UseStateForUnknown),
        )
        .with_attribute(
            "revision_date",
            Attribute::computed().describe(
                "String representation of the revision date of the secret.",
                "String representation of the `revision_date` of the secret.",
            ),
        )
    }

    async fn configure(&mut self, req: &ConfigureRequest, resp: &mut ConfigureResponse) {
        if let Some(context) = configure_context("secret", req, resp) {
            self.context = Some(context);
        }
    }

    #[instrument(skip_all, fields(resource = "secret"))]
    async fn create(&self, req: &CreateRequest, resp: &mut CreateResponse) {
        let Some(plan) = resp.diagnostics.capture(req.plan.get::<SecretResourceModel>()) else {
            return;
        };
        let Some(context) = require_context(self.context(), &mut resp.diagnostics) else {
            return;
        };

        let request = SecretCreateRequest {
            organization_id: context.organization_id.clone(),
            project_ids: plan.project_ids(),
            key: plan.key.unwrap_or_default(),
            value: plan.value.unwrap_or_default(),
            note: plan.note.unwrap_or_default(),
        };

        let secret = match context.client.secrets().create(&request).await {
            Ok(secret) => secret,
            Err(err) => {
                resp.diagnostics
                    .add_error("Unable to Create Secret", err.to_string());
                return;
            }
        };

        let diags = resp.state.set(&SecretResourceModel::from(&secret));
        resp.diagnostics.append(diags);
        info!(id = %secret.id, key = %secret.key, "Created secret");
    }

    #[instrument(skip_all, fields(resource = "secret"))]
    async fn read(&self, req: &ReadRequest, resp: &mut ReadResponse) {
        info!("Reading secret resource");

        let Some(mut state) = resp.diagnostics.capture(req.state.get::<SecretResourceModel>())
        else {
            return;
        };
        let Some(context) = require_context(self.context(), &mut resp.diagnostics) else {
            return;
        };

        let id = state.id.clone().unwrap_or_default();
        let secret = match context.client.secrets().get(&id).await {
            Ok(secret) => secret,
            Err(err) => {
                resp.diagnostics.add_error(
                    format!("Unable to Read Secret with id: {id}"),
                    err.to_string(),
                );
                return;
            }
        };

        state.apply(&secret);
        let diags = resp.state.set(&state);
        resp.diagnostics.append(diags);
    }

    #[instrument(skip_all, fields(resource = "secret"))]
    async fn update(&self, req: &UpdateRequest, resp: &mut UpdateResponse) {
        let Some(plan) = resp.diagnostics.capture(req.plan.get::<SecretResourceModel>()) else {
            return;
        };
        let Some(mut state) = resp.diagnostics.capture(req.state.get::<SecretResourceModel>())
        else {
            return;
        };
        let Some(context) = require_context(self.context(), &mut resp.diagnostics) else {
            return;
        };

        let request = SecretPutRequest {
            id: state.id.clone().unwrap_or_default(),
            organization_id: context.organization_id.clone(),
            project_ids: plan.project_ids(),
            key: plan.key.unwrap_or_default(),
            value: plan.value.unwrap_or_default(),
            note: plan.note.unwrap_or_default(),
        };

        let secret = match context.client.secrets().update(&request).await {
            Ok(secret) => secret,
            Err(err) => {
                resp.diagnostics
                    .add_error("Unable to Update Secret", err.to_string());
                return;
            }
        };

        state.apply(&secret);
        let diags = resp.state.set(&state);
        resp.diagnostics.append(diags);
        info!(id = %secret.id, "Updated secret");
    }

    #[instrument(skip_all, fields(resource = "secret"))]
    async fn delete(&self, req: &DeleteRequest, resp: &mut DeleteResponse) {
        let Some(state) = resp.diagnostics.capture(req.state.get::<SecretResourceModel>()) else {
            return;
        };
        let Some(context) = require_context(self.context(), &mut resp.diagnostics) else {
            return;
        };

        let id = state.id.unwrap_or_default();
        let response = match context.client.secrets().delete(&[id.clone()]).await {
            Ok(response) => response,
            Err(err) => {
                resp.diagnostics
                    .add_error("Unable to Delete Secret", err.to_string());
                return;
            }
        };

        match response.data.first() {
            Some(result) => {
                if let Some(message) = &result.error {
                    resp.diagnostics.add_error("Error deleting Secret", message.clone());
                } else {
                    info!(%id, "Deleted secret");
                }
            }
            None => resp.diagnostics.add_error(
                "Unable to Delete Secret",
                format!("The delete response did not include a result for secret {id}."),
            ),
        }
    }

    async fn import_state(&self, req: &ImportStateRequest, resp: &mut ImportStateResponse) {
        import_state_passthrough_id("id", req, resp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::State;
    use crate::provider::ProviderData;
    use serde_json::json;
    use std::sync::Arc;
    use test_utils::fixtures::{SAMPLE_ORGANIZATION_ID, sample_secret};
    use test_utils::{MockSecretsManagerClient, Operation};

    async fn configured(client: &Arc<MockSecretsManagerClient>) -> SecretResource {
        let mut resource = SecretResource::default();
        let req = ConfigureRequest {
            provider_data: Some(Arc::new(ProviderData {
                client: Some(client.clone()),
                organization_id: SAMPLE_ORGANIZATION_ID.to_string(),
            })),
        };
        resource
            .configure(&req, &mut ConfigureResponse::default())
            .await;
        resource
    }

    #[test]
    fn test_value_is_sensitive() {
        let schema = SecretResource::default().schema();
        assert!(schema.attribute("value").is_some_and(|a| a.sensitive && a.required));
        assert!(schema.attribute("note").is_some_and(|a| a.optional && a.computed));
    }

    #[test]
    fn test_model_debug_redacts_value() {
        let model = SecretResourceModel::from(&sample_secret());
        let debug = format!("{model:?}");
        assert!(!debug.contains("correct-horse-battery-staple"));
        assert!(debug.contains("DB_PASSWORD"));
    }

    #[tokio::test]
    async fn test_create_without_project() {
        let client = Arc::new(MockSecretsManagerClient::new());
        let resource = configured(&client).await;

        let req = CreateRequest {
            plan: State::from_value(json!({"key": "API_KEY", "value": "s3cr3t"})),
            ..CreateRequest::default()
        };
        let mut resp = CreateResponse::default();
        resource.create(&req, &mut resp).await;

        assert!(resp.diagnostics.is_empty());
        let state: SecretResourceModel = resp.state.get().unwrap();
        assert_eq!(state.key.as_deref(), Some("API_KEY"));
        assert_eq!(state.note.as_deref(), Some(""));
        assert_eq!(state.project_id, None);
        assert_eq!(state.organization_id.as_deref(), Some(SAMPLE_ORGANIZATION_ID));
    }

    #[tokio::test]
    async fn test_update_moves_project_and_keeps_identity() {
        let client = Arc::new(MockSecretsManagerClient::new());
        client.insert_secret(sample_secret()).await;
        let resource = configured(&client).await;
        let prior = SecretResourceModel::from(&sample_secret());

        let mut prior_state = State::null();
        assert!(prior_state.set(&prior).is_empty());

        let req = UpdateRequest {
            plan: State::from_value(json!({
                "id": "s1",
                "key": "DB_PASSWORD",
                "value": "rotated",
                "note": "rotated quarterly",
                "project_id": "other-project"
            })),
            state: prior_state,
            ..UpdateRequest::default()
        };
        let mut resp = UpdateResponse::default();
        resource.update(&req, &mut resp).await;

        assert!(resp.diagnostics.is_empty());
        let state: SecretResourceModel = resp.state.get().unwrap();
        assert_eq!(state.id, prior.id);
        assert_eq!(state.creation_date, prior.creation_date);
        assert_eq!(state.value.as_deref(), Some("rotated"));
        assert_eq!(state.project_id.as_deref(), Some("other-project"));
        assert_ne!(state.revision_date, prior.revision_date);
    }

    #[tokio::test]
    async fn test_read_failure_names_id() {
        let client = Arc::new(MockSecretsManagerClient::new());
        client.fail(Operation::GetSecret, "forbidden").await;
        let resource = configured(&client).await;

        let mut resp = ReadResponse::default();
        resource
            .read(
                &ReadRequest {
                    state: State::from_value(json!({"id": "s1"})),
                },
                &mut resp,
            )
            .await;

        let diag = resp.diagnostics.errors().next().unwrap();
        assert_eq!(diag.summary, "Unable to Read Secret with id: s1");
        assert!(diag.detail.contains("forbidden"));
    }

    #[tokio::test]
    async fn test_delete_item_error() {
        let client = Arc::new(MockSecretsManagerClient::new());
        client.insert_secret(sample_secret()).await;
        client.fail_delete_item("s1", "Secret is locked").await;
        let resource = configured(&client).await;

        let mut resp = DeleteResponse::default();
        resource
            .delete(
                &DeleteRequest {
                    state: State::from_value(json!({"id": "s1"})),
                },
                &mut resp,
            )
            .await;

        let diag = resp.diagnostics.errors().next().unwrap();
        assert_eq!(diag.summary, "Error deleting Secret");
        assert_eq!(diag.detail, "Secret is locked");
    }

    #[tokio::test]
    async fn test_delete_empty_result_list() {
        let client = Arc::new(MockSecretsManagerClient::new());
        client.insert_secret(sample_secret()).await;
        client.return_empty_delete().await;
        let resource = configured(&client).await;

        let mut resp = DeleteResponse::default();
        resource
            .delete(
                &DeleteRequest {
                    state: State::from_value(json!({"id": "s1"})),
                },
                &mut resp,
            )
            .await;

        let diags: Vec<_> = resp.diagnostics.errors().collect();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].summary, "Unable to Delete Secret");
        assert!(client.secret("s1").await.is_some());
    }
}
