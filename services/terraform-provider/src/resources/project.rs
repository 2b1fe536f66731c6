//! The `project` resource.

use async_trait::async_trait;
use bws_sdk::Project;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{ResourceContext, configure_context, format_timestamp, require_context};
use crate::framework::{
    Attribute, ConfigureRequest, ConfigureResponse, CreateRequest, CreateResponse, DeleteRequest,
    DeleteResponse, ImportStateRequest, ImportStateResponse, MetadataRequest, MetadataResponse,
    PlanModifier, ReadRequest, ReadResponse, Resource, Schema, UpdateRequest, UpdateResponse,
    import_state_passthrough_id,
};

/// State and plan model for `project`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResourceModel {
    /// Project id, assigned by the server
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
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

impl ProjectResourceModel {
    /// Overwrite everything except `id` with the server's view.
    fn apply(&mut self, project: &Project) {
        self.name = Some(project.name.clone());
        self.organization_id = Some(project.organization_id.clone());
        self.creation_date = Some(format_timestamp(&project.creation_date));
        self.revision_date = Some(format_timestamp(&project.revision_date));
    }
}

impl From<&Project> for ProjectResourceModel {
    fn from(project: &Project) -> Self {
        let mut model = Self {
            id: Some(project.id.clone()),
            ..Self::default()
        };
        model.apply(project);
        model
    }
}

/// Manages projects in Bitwarden Secrets Manager.
#[derive(Debug, Default)]
pub struct ProjectResource {
    context: Option<ResourceContext>,
}

impl ProjectResource {
    fn context(&self) -> Option<&ResourceContext> {
        self.context.as_ref()
    }
}

#[async_trait]
impl Resource for ProjectResource {
    fn metadata(&self, req: &MetadataRequest, resp: &mut MetadataResponse) {
        resp.type_name = format!("{}_project", req.provider_type_name);
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "The project resource manages projects in Bitwarden Secrets Manager.",
            "The `project` resource manages projects in Bitwarden Secrets Manager.",
        )
        .with_attribute(
            "id",
            Attribute::computed()
                .describe(
                    "String representation of the ID of the project inside Bitwarden Secrets Manager.",
                    "String representation of the `ID` of the project inside Bitwarden Secrets Manager.",
                )
                .plan_modifier(PlanModifier::UseStateForUnknown),
        )
        .with_attribute(
            "name",
            Attribute::required().describe(
                "String representation of the name of the project inside Bitwarden Secrets Manager.",
                "String representation of the `name` of the project inside Bitwarden Secrets Manager.",
            ),
        )
        .with_attribute(
            "organization_id",
            Attribute::computed()
                .describe(
                    "String representation of the ID of the organization to which the project belongs.",
                    "String representation of the `ID` of the organization to which the project belongs.",
                )
                .plan_modifier(PlanModifier::UseStateForUnknown),
        )
        .with_attribute(
            "creation_date",
            Attribute::computed()
                .describe(
                    "String representation of the creation date of the project.",
                    "String representation of the `creation_date` of the project.",
                )
                .plan_modifier(PlanModifier::UseStateForUnknown),
        )
        .with_attribute(
            "revision_date",
            Attribute::computed().describe(
                "String representation of the revision date of the project.",
                "String representation of the `revision_date` of the project.",
            ),
        )
    }

    async fn configure(&mut self, req: &ConfigureRequest, resp: &mut ConfigureResponse) {
        if let Some(context) = configure_context("project", req, resp) {
            self.context = Some(context);
        }
    }

    #[instrument(skip_all, fields(resource = "project"))]
    async fn create(&self, req: &CreateRequest, resp: &mut CreateResponse) {
        let Some(plan) = resp.diagnostics.capture(req.plan.get::<ProjectResourceModel>()) else {
            return;
        };
        let Some(context) = require_context(self.context(), &mut resp.diagnostics) else {
            return;
        };

        let name = plan.name.unwrap_or_default();
        let project = match context
            .client
            .projects()
            .create(&context.organization_id, &name)
            .await
        {
            Ok(project) => project,
            Err(err) => {
                resp.diagnostics
                    .add_error("Unable to Create Project", err.to_string());
                return;
            }
        };

        let diags = resp.state.set(&ProjectResourceModel::from(&project));
        resp.diagnostics.append(diags);
        info!(id = %project.id, "Created project");
    }

    #[instrument(skip_all, fields(resource = "project"))]
    async fn read(&self, req: &ReadRequest, resp: &mut ReadResponse) {
        info!("Reading project resource");

        let Some(mut state) = resp.diagnostics.capture(req.state.get::<ProjectResourceModel>())
        else {
            return;
        };
        let Some(context) = require_context(self.context(), &mut resp.diagnostics) else {
            return;
        };

        let id = state.id.clone().unwrap_or_default();
        let project = match context.client.projects().get(&id).await {
            Ok(project) => project,
            Err(err) => {
                resp.diagnostics.add_error(
                    format!("Unable to Read Project with id: {id}"),
                    err.to_string(),
                );
                return;
            }
        };

        state.apply(&project);
        let diags = resp.state.set(&state);
        resp.diagnostics.append(diags);
    }

    #[instrument(skip_all, fields(resource = "project"))]
    async fn update(&self, req: &UpdateRequest, resp: &mut UpdateResponse) {
        let Some(plan) = resp.diagnostics.capture(req.plan.get::<ProjectResourceModel>()) else {
            return;
        };
        let Some(mut state) = resp.diagnostics.capture(req.state.get::<ProjectResourceModel>())
        else {
            return;
        };
        let Some(context) = require_context(self.context(), &mut resp.diagnostics) else {
            return;
        };

        let id = state.id.clone().unwrap_or_default();
        let name = plan.name.unwrap_or_default();
        let project = match context
            .client
            .projects()
            .update(&id, &context.organization_id, &name)
            .await
        {
            Ok(project) => project,
            Err(err) => {
                resp.diagnostics
                    .add_error("Unable to Update Project", err.to_string());
                return;
            }
        };

        state.apply(&project);
        let diags = resp.state.set(&state);
        resp.diagnostics.append(diags);
        info!(%id, "Updated project");
    }

    #[instrument(skip_all, fields(resource = "project"))]
    async fn delete(&self, req: &DeleteRequest, resp: &mut DeleteResponse) {
        let Some(state) = resp.diagnostics.capture(req.state.get::<ProjectResourceModel>()) else {
            return;
        };
        let Some(context) = require_context(self.context(), &mut resp.diagnostics) else {
            return;
        };

        let id = state.id.unwrap_or_default();
        let response = match context.client.projects().delete(&[id.clone()]).await {
            Ok(response) => response,
            Err(err) => {
                resp.diagnostics
                    .add_error("Unable to Delete Project", err.to_string());
                return;
            }
        };

        match response.data.first() {
            Some(result) => {
                if let Some(message) = &result.error {
                    resp.diagnostics.add_error("Error deleting Project", message.clone());
                } else {
                    info!(%id, "Deleted project");
                }
            }
            None => resp.diagnostics.add_error(
                "Unable to Delete Project",
                format!("The delete response did not include a result for project {id}."),
            ),
        }
    }

    async fn import_state(&self, req: &ImportStateRequest, resp: &mut ImportStateResponse) {
        import_state_passthrough_id("id", req, resp);
    }
}
