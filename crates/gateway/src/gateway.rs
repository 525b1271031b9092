//! The gateway seam consumed by the state layer.

use async_trait::async_trait;
use projdesk_core::dashboard::{PhaseModuleCount, TotalModules, TotalProjects};
use projdesk_core::module::{Module, ModuleDraft, ModuleUpdate};
use projdesk_core::phase::{Phase, PhaseDraft};
use projdesk_core::project::{Project, ProjectDraft};
use projdesk_core::types::DbId;

use crate::error::GatewayResult;

/// Typed request/response access to projects, modules, phases and the
/// dashboard aggregates.
///
/// `update_*` calls are full replacements. They return the resource when
/// the server echoes it and `None` when it answers with anything else.
#[async_trait]
pub trait EntityGateway: Send + Sync {
    // ---- projects ----

    async fn list_projects(&self) -> GatewayResult<Vec<Project>>;

    async fn get_project(&self, id: DbId) -> GatewayResult<Project>;

    async fn create_project(&self, draft: &ProjectDraft) -> GatewayResult<Project>;

    async fn update_project(&self, id: DbId, body: &ProjectDraft)
        -> GatewayResult<Option<Project>>;

    async fn delete_project(&self, id: DbId) -> GatewayResult<()>;

    // ---- modules ----

    /// Modules owned by `project_id`. A "no modules" answer is an empty list.
    async fn list_modules(&self, project_id: DbId) -> GatewayResult<Vec<Module>>;

    async fn create_module(&self, draft: &ModuleDraft) -> GatewayResult<Module>;

    async fn update_module(&self, id: DbId, body: &ModuleUpdate)
        -> GatewayResult<Option<Module>>;

    async fn delete_module(&self, id: DbId) -> GatewayResult<()>;

    // ---- phases ----

    async fn list_phases(&self) -> GatewayResult<Vec<Phase>>;

    async fn create_phase(&self, draft: &PhaseDraft) -> GatewayResult<Phase>;

    async fn update_phase(&self, id: DbId, body: &PhaseDraft) -> GatewayResult<Option<Phase>>;

    // ---- dashboard ----

    async fn total_projects(&self) -> GatewayResult<TotalProjects>;

    async fn total_modules(&self) -> GatewayResult<TotalModules>;

    async fn modules_by_phase(&self) -> GatewayResult<Vec<PhaseModuleCount>>;

    async fn project_progress(&self) -> GatewayResult<serde_json::Value>;
}
