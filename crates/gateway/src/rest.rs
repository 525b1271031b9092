//! HTTP implementation of [`EntityGateway`].
//!
//! Wraps the console REST API (projects, modules, phases, dashboard
//! aggregates) using [`reqwest`]. Every non-2xx status, transport failure
//! and undecodable body surfaces as a [`GatewayError`].

use std::time::Duration;

use async_trait::async_trait;
use projdesk_core::dashboard::{PhaseModuleCount, TotalModules, TotalProjects};
use projdesk_core::module::{Module, ModuleDraft, ModuleUpdate};
use projdesk_core::phase::{Phase, PhaseDraft};
use projdesk_core::project::{Project, ProjectDraft};
use projdesk_core::types::DbId;
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{GatewayError, GatewayResult, Resource};
use crate::gateway::EntityGateway;

/// Message the module-list endpoint sends instead of an empty list.
pub const NO_MODULES_MESSAGE: &str = "No se encontraron módulos para el proyecto especificado";

/// HTTP client for one console API deployment.
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
}

impl RestGateway {
    /// Create a gateway for `base_url` (e.g. `http://localhost:3000`) whose
    /// requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- private helpers ----

    /// Send a request with an optional JSON body. Only transport failures
    /// are errors here; status handling is left to the caller.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> GatewayResult<reqwest::Response> {
        tracing::debug!(method = %method, path, "Sending API request");

        let mut request = self
            .client
            .request(method.clone(), format!("{}{}", self.base_url, path))
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            let err = GatewayError::from(e);
            tracing::warn!(method = %method, path, error = %err, "API request failed");
            err
        })
    }

    /// Issue a request whose body is not needed and expect a 2xx status.
    async fn execute(&self, method: Method, path: &str) -> GatewayResult<reqwest::Response> {
        let response = self.send::<()>(method, path, None).await?;
        ensure_success(path, response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: Resource,
        path: &str,
    ) -> GatewayResult<T> {
        let response = self.execute(Method::GET, path).await?;
        parse_body(resource, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        resource: Resource,
        path: &str,
        body: &B,
    ) -> GatewayResult<T> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        let response = ensure_success(path, response).await?;
        parse_body(resource, response).await
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        resource: Resource,
        path: &str,
        body: &B,
    ) -> GatewayResult<Option<T>> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        let response = ensure_success(path, response).await?;
        parse_optional_body(resource, response).await
    }

    async fn delete(&self, path: &str) -> GatewayResult<()> {
        self.execute(Method::DELETE, path).await?;
        Ok(())
    }
}

/// Return the response unchanged on a 2xx status, or a
/// [`GatewayError::Http`] carrying the status and body text.
async fn ensure_success(
    path: &str,
    response: reqwest::Response,
) -> GatewayResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    tracing::warn!(path, status = status.as_u16(), "API returned an error status");
    Err(GatewayError::Http {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    })
}

/// Decode a successful body as `T`.
async fn parse_body<T: DeserializeOwned>(
    resource: Resource,
    response: reqwest::Response,
) -> GatewayResult<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| GatewayError::shape(resource, e.to_string()))
}

/// Decode a successful body as `T` when it is one; an empty or different
/// body yields `None`.
async fn parse_optional_body<T: DeserializeOwned>(
    resource: Resource,
    response: reqwest::Response,
) -> GatewayResult<Option<T>> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str(&text) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!(%resource, error = %e, "Update response is not a resource, ignoring");
            Ok(None)
        }
    }
}

/// Interpret a module-list body.
///
/// A JSON array decodes as modules; the structured "no modules" message
/// is an empty list; anything else is a shape mismatch.
fn decode_module_list(body: &str) -> GatewayResult<Vec<Module>> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| GatewayError::shape(Resource::Module, e.to_string()))?;

    if value.is_array() {
        return serde_json::from_value(value)
            .map_err(|e| GatewayError::shape(Resource::Module, e.to_string()));
    }

    match value.get("message").and_then(|m| m.as_str()) {
        Some(NO_MODULES_MESSAGE) => Ok(Vec::new()),
        Some(other) => Err(GatewayError::shape(
            Resource::Module,
            format!("unexpected message: {other}"),
        )),
        None => Err(GatewayError::shape(
            Resource::Module,
            "expected a list of modules",
        )),
    }
}

fn is_no_modules_message(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(|m| m == NO_MODULES_MESSAGE))
        .unwrap_or(false)
}

#[async_trait]
impl EntityGateway for RestGateway {
    async fn list_projects(&self) -> GatewayResult<Vec<Project>> {
        self.get_json(Resource::Project, "/projects").await
    }

    async fn get_project(&self, id: DbId) -> GatewayResult<Project> {
        self.get_json(Resource::Project, &format!("/projects/{id}")).await
    }

    async fn create_project(&self, draft: &ProjectDraft) -> GatewayResult<Project> {
        self.post_json(Resource::Project, "/projects", draft).await
    }

    async fn update_project(
        &self,
        id: DbId,
        body: &ProjectDraft,
    ) -> GatewayResult<Option<Project>> {
        self.put_json(Resource::Project, &format!("/projects/{id}"), body).await
    }

    async fn delete_project(&self, id: DbId) -> GatewayResult<()> {
        self.delete(&format!("/projects/{id}")).await
    }

    async fn list_modules(&self, project_id: DbId) -> GatewayResult<Vec<Module>> {
        let path = format!("/modules/project/{project_id}");
        let response = self.send::<()>(Method::GET, &path, None).await?;
        let status = response.status();
        let body = response.text().await?;

        // The "no modules" message may arrive with a 404.
        if !status.is_success() {
            if is_no_modules_message(&body) {
                return Ok(Vec::new());
            }
            tracing::warn!(path = %path, status = status.as_u16(), "API returned an error status");
            return Err(GatewayError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        decode_module_list(&body)
    }

    async fn create_module(&self, draft: &ModuleDraft) -> GatewayResult<Module> {
        self.post_json(Resource::Module, "/modules", draft).await
    }

    async fn update_module(
        &self,
        id: DbId,
        body: &ModuleUpdate,
    ) -> GatewayResult<Option<Module>> {
        self.put_json(Resource::Module, &format!("/modules/{id}"), body).await
    }

    async fn delete_module(&self, id: DbId) -> GatewayResult<()> {
        self.delete(&format!("/modules/{id}")).await
    }

    async fn list_phases(&self) -> GatewayResult<Vec<Phase>> {
        self.get_json(Resource::Phase, "/phases").await
    }

    async fn create_phase(&self, draft: &PhaseDraft) -> GatewayResult<Phase> {
        self.post_json(Resource::Phase, "/phases", draft).await
    }

    async fn update_phase(&self, id: DbId, body: &PhaseDraft) -> GatewayResult<Option<Phase>> {
        self.put_json(Resource::Phase, &format!("/phases/{id}"), body).await
    }

    async fn total_projects(&self) -> GatewayResult<TotalProjects> {
        self.get_json(Resource::Dashboard, "/dashboard/total-projects").await
    }

    async fn total_modules(&self) -> GatewayResult<TotalModules> {
        self.get_json(Resource::Dashboard, "/dashboard/total-modules").await
    }

    async fn modules_by_phase(&self) -> GatewayResult<Vec<PhaseModuleCount>> {
        self.get_json(Resource::Dashboard, "/dashboard/modules-by-phase").await
    }

    async fn project_progress(&self) -> GatewayResult<serde_json::Value> {
        self.get_json(Resource::Dashboard, "/dashboard/project-progress").await
    }
}
