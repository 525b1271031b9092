//! Project list view.
//!
//! Project edits are applied to the local collection without refetching.
//! The list is paginated by viewport width: the view registers a resize
//! listener on activation and drops it on deactivation.

use std::sync::Arc;

use projdesk_core::confirm::Confirmer;
use projdesk_core::entity::Entity;
use projdesk_core::error::CoreError;
use projdesk_core::pagination::Pagination;
use projdesk_core::project::{Project, ProjectDraft};
use projdesk_core::types::DbId;
use projdesk_events::{Notification, NotificationBus};
use projdesk_gateway::EntityGateway;

use crate::cache::EntityCache;
use crate::delete::{confirm_then_delete, DeleteOutcome};
use crate::error::ViewResult;
use crate::viewport::{ResizeListener, Viewport};
use crate::views::{notify_failure, ViewStatus};

pub struct ProjectListView {
    gateway: Arc<dyn EntityGateway>,
    bus: Arc<NotificationBus>,
    cache: EntityCache,
    pagination: Pagination,
    listener: ResizeListener,
    status: ViewStatus,
}

impl ProjectListView {
    /// Register for resizes and load the project list.
    pub async fn activate(
        gateway: Arc<dyn EntityGateway>,
        bus: Arc<NotificationBus>,
        viewport: &Viewport,
    ) -> Self {
        let listener = viewport.listen();
        let mut view = Self {
            gateway,
            bus,
            cache: EntityCache::new(),
            pagination: Pagination::new(listener.current()),
            listener,
            status: ViewStatus::Loading,
        };
        // A failed load is recorded in `status`.
        let _ = view.reload().await;
        view
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn projects(&self) -> &[Project] {
        self.cache.projects()
    }

    pub fn project(&self, id: DbId) -> Option<&Project> {
        self.cache.project(id)
    }

    /// Replace the list with a fresh fetch.
    pub async fn reload(&mut self) -> ViewResult<()> {
        match self.gateway.list_projects().await {
            Ok(projects) => {
                tracing::debug!(count = projects.len(), "Loaded projects");
                self.cache.set_projects(projects);
                self.status = ViewStatus::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load projects");
                self.status = ViewStatus::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    // ---- mutations ----

    pub async fn create_project(&mut self, draft: ProjectDraft) -> ViewResult<Project> {
        draft.check()?;
        let created = match self.gateway.create_project(&draft).await {
            Ok(project) => project,
            Err(e) => {
                notify_failure(&self.bus, "No se pudo crear el proyecto", &e);
                return Err(e.into());
            }
        };

        tracing::info!(project_id = created.id, "Project created");
        self.bus.publish(
            Notification::success(
                "Proyecto creado",
                format!("El proyecto {} ha sido creado exitosamente", created.name),
            )
            .with_subject(Project::KIND, created.id),
        );
        Ok(self.cache.apply_project_create(created).clone())
    }

    /// Replace every editable field of project `id`. The local copy is
    /// updated in place; the list is not refetched.
    pub async fn update_project(&mut self, id: DbId, body: ProjectDraft) -> ViewResult<Project> {
        if self.cache.project(id).is_none() {
            return Err(CoreError::NotFound { entity: Project::KIND, id }.into());
        }
        body.check()?;

        let echoed = match self.gateway.update_project(id, &body).await {
            Ok(echoed) => echoed,
            Err(e) => {
                notify_failure(&self.bus, "No se pudo actualizar el proyecto", &e);
                return Err(e.into());
            }
        };

        let updated = match echoed.filter(|p| p.id == id) {
            Some(project) => self.cache.apply_project_create(project),
            None => self.cache.apply_project_update(id, body)?,
        };
        tracing::info!(project_id = id, "Project updated");
        self.bus.publish(
            Notification::success(
                "Proyecto actualizado",
                "El proyecto ha sido actualizado exitosamente",
            )
            .with_subject(Project::KIND, id),
        );
        Ok(updated.clone())
    }

    /// Ask for confirmation, then delete project `id`.
    pub async fn delete_project(
        &mut self,
        id: DbId,
        confirmer: &dyn Confirmer,
    ) -> ViewResult<DeleteOutcome> {
        let subject = match self.cache.project(id) {
            Some(project) => format!("el proyecto {}", project.name),
            None => return Err(CoreError::NotFound { entity: Project::KIND, id }.into()),
        };

        let gateway = Arc::clone(&self.gateway);
        let outcome =
            confirm_then_delete(confirmer, &subject, move || async move {
                gateway.delete_project(id).await
            })
            .await;

        match &outcome {
            DeleteOutcome::Deleted => {
                self.cache.apply_project_delete(id);
                tracing::info!(project_id = id, "Project deleted");
                self.bus.publish(
                    Notification::success("Eliminado", "El proyecto ha sido eliminado exitosamente")
                        .with_subject(Project::KIND, id),
                );
            }
            DeleteOutcome::Failed(e) => {
                notify_failure(&self.bus, "No se pudo eliminar el proyecto", e);
            }
            DeleteOutcome::Cancelled => {}
        }
        Ok(outcome)
    }

    // ---- pagination ----

    /// Apply a pending viewport resize, if any. Returns `true` when the
    /// pagination mode changed.
    pub fn sync_viewport(&mut self) -> bool {
        match self.listener.poll() {
            Some(width) => self.pagination.on_resize(width),
            None => false,
        }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.cache.projects().len())
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let len = self.cache.projects().len();
        self.pagination.go_to_page(page, len)
    }

    pub fn next_page(&mut self) -> bool {
        let len = self.cache.projects().len();
        self.pagination.next_page(len)
    }

    pub fn previous_page(&mut self) -> bool {
        let len = self.cache.projects().len();
        self.pagination.previous_page(len)
    }

    /// Page numbers to offer; empty when the controls are hidden.
    pub fn page_numbers(&self) -> Vec<usize> {
        if !self.pagination.controls_visible() {
            return Vec::new();
        }
        self.pagination
            .page_numbers(self.cache.projects().len())
            .collect()
    }

    /// The projects to render now: all of them, or the current page.
    pub fn visible_projects(&mut self) -> &[Project] {
        self.sync_viewport();
        self.pagination.select(self.cache.projects())
    }
}
