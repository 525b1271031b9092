//! Project detail view: one project, its modules and the phase catalog.
//!
//! Activation starts three fetches together (project, modules, phases).
//! They resolve in any order and each merges into its own slice of the
//! cache as it arrives. All background work is bound to the view's
//! [`ViewScope`]; after [`ProjectDetailView::deactivate`] or drop, late
//! results are discarded.
//!
//! A failed fetch marks the view failed until that slice loads again.
//!
//! Module creation and deletion refetch the module list. A module update
//! is merged locally and only the parent project is refetched, in the
//! background, to pick up server-side rollups.

use std::sync::Arc;

use projdesk_core::confirm::Confirmer;
use projdesk_core::entity::Entity;
use projdesk_core::error::CoreError;
use projdesk_core::module::{resolve_phase_id, Module, ModuleDraft, ModulePatch, ModuleUpdate};
use projdesk_core::phase::Phase;
use projdesk_core::project::Project;
use projdesk_core::types::DbId;
use projdesk_events::{Notification, NotificationBus};
use projdesk_gateway::{EntityGateway, GatewayError, GatewayResult};
use tokio::sync::mpsc;

use crate::cache::EntityCache;
use crate::delete::{confirm_then_delete, DeleteOutcome};
use crate::error::{ViewError, ViewResult};
use crate::scope::ViewScope;
use crate::views::{notify_failure, ViewStatus};

/// Which part of the view a completed fetch filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadedSlice {
    Project,
    Modules,
    Phases,
}

enum Loaded {
    Project(GatewayResult<Project>),
    Modules(GatewayResult<Vec<Module>>),
    Phases(GatewayResult<Vec<Phase>>),
}

impl Loaded {
    fn slice(&self) -> LoadedSlice {
        match self {
            Loaded::Project(_) => LoadedSlice::Project,
            Loaded::Modules(_) => LoadedSlice::Modules,
            Loaded::Phases(_) => LoadedSlice::Phases,
        }
    }
}

pub struct ProjectDetailView {
    project_id: DbId,
    gateway: Arc<dyn EntityGateway>,
    bus: Arc<NotificationBus>,
    cache: EntityCache,
    scope: ViewScope,
    tx: mpsc::UnboundedSender<Loaded>,
    rx: mpsc::UnboundedReceiver<Loaded>,
    in_flight: usize,
    load_errors: Vec<(LoadedSlice, String)>,
}

impl ProjectDetailView {
    /// Activate the view for `project_id` and start its three fetches.
    ///
    /// Returns immediately; drive the fetches with
    /// [`next_update`](Self::next_update) or [`settle`](Self::settle).
    pub fn open(
        project_id: DbId,
        gateway: Arc<dyn EntityGateway>,
        bus: Arc<NotificationBus>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut view = Self {
            project_id,
            gateway,
            bus,
            cache: EntityCache::new(),
            scope: ViewScope::new(),
            tx,
            rx,
            in_flight: 0,
            load_errors: Vec::new(),
        };
        tracing::debug!(project_id, "Opening project detail");
        view.spawn_fetch(LoadedSlice::Project);
        view.spawn_fetch(LoadedSlice::Modules);
        view.spawn_fetch(LoadedSlice::Phases);
        view
    }

    /// [`open`](Self::open) and wait for all three fetches.
    pub async fn activate(
        project_id: DbId,
        gateway: Arc<dyn EntityGateway>,
        bus: Arc<NotificationBus>,
    ) -> Self {
        let mut view = Self::open(project_id, gateway, bus);
        view.settle().await;
        view
    }

    /// Tear the view down. Pending fetches are cancelled and nothing is
    /// merged afterwards.
    pub fn deactivate(&mut self) {
        tracing::debug!(project_id = self.project_id, "Closing project detail");
        self.scope.close();
        self.in_flight = 0;
    }

    pub fn is_active(&self) -> bool {
        self.scope.is_active()
    }

    // ---- reads ----

    pub fn project_id(&self) -> DbId {
        self.project_id
    }

    pub fn status(&self) -> ViewStatus {
        if let Some((_, message)) = self.load_errors.first() {
            return ViewStatus::Failed(message.clone());
        }
        match self.cache.project(self.project_id) {
            Some(_) => ViewStatus::Ready,
            None => ViewStatus::Loading,
        }
    }

    pub fn project(&self) -> Option<&Project> {
        self.cache.project(self.project_id)
    }

    pub fn modules(&self) -> &[Module] {
        self.cache.modules()
    }

    pub fn module(&self, id: DbId) -> Option<&Module> {
        self.cache.module(id)
    }

    /// The phases a module form may offer.
    pub fn phase_choices(&self) -> &[Phase] {
        self.cache.phases()
    }

    /// Number of fetches started but not yet merged.
    pub fn pending(&self) -> usize {
        self.in_flight
    }

    // ---- background loading ----

    fn spawn_fetch(&mut self, slice: LoadedSlice) {
        let gateway = Arc::clone(&self.gateway);
        let scope = self.scope.handle();
        let tx = self.tx.clone();
        let project_id = self.project_id;
        self.in_flight += 1;

        tokio::spawn(async move {
            let fetch = async {
                match slice {
                    LoadedSlice::Project => Loaded::Project(gateway.get_project(project_id).await),
                    LoadedSlice::Modules => Loaded::Modules(gateway.list_modules(project_id).await),
                    LoadedSlice::Phases => Loaded::Phases(gateway.list_phases().await),
                }
            };
            match scope.bind(fetch).await {
                Some(loaded) => {
                    let _ = tx.send(loaded);
                }
                None => tracing::debug!(project_id, ?slice, "Discarding fetch for closed view"),
            }
        });
    }

    /// Wait for the next fetch to complete and merge it. `None` when no
    /// fetch is pending or the view is closed.
    pub async fn next_update(&mut self) -> Option<LoadedSlice> {
        if self.in_flight == 0 || !self.scope.is_active() {
            return None;
        }
        let handle = self.scope.handle();
        let loaded = handle.bind(self.rx.recv()).await.flatten()?;
        self.in_flight -= 1;
        let slice = loaded.slice();
        self.apply(loaded);
        Some(slice)
    }

    /// Merge every pending fetch.
    pub async fn settle(&mut self) {
        while self.next_update().await.is_some() {}
    }

    fn apply(&mut self, loaded: Loaded) {
        if !self.scope.is_active() {
            return;
        }
        let slice = loaded.slice();
        match loaded {
            Loaded::Project(Ok(project)) => {
                if project.id == self.project_id {
                    self.cache.apply_project_create(project);
                }
                self.clear_error(slice);
            }
            Loaded::Modules(Ok(modules)) => {
                let project_id = self.project_id;
                tracing::debug!(project_id, count = modules.len(), "Loaded modules");
                self.cache.set_modules(
                    modules
                        .into_iter()
                        .filter(|m| m.project_id == project_id)
                        .collect(),
                );
                self.clear_error(slice);
            }
            Loaded::Phases(Ok(phases)) => {
                tracing::debug!(count = phases.len(), "Loaded phases");
                self.cache.set_phases(phases);
                self.clear_error(slice);
            }
            Loaded::Project(Err(e)) | Loaded::Modules(Err(e)) | Loaded::Phases(Err(e)) => {
                self.record_failure(slice, &e);
            }
        }
    }

    fn record_failure(&mut self, slice: LoadedSlice, error: &GatewayError) {
        tracing::warn!(
            project_id = self.project_id,
            ?slice,
            error = %error,
            "Project detail fetch failed"
        );
        self.clear_error(slice);
        self.load_errors.push((slice, error.to_string()));
    }

    fn clear_error(&mut self, slice: LoadedSlice) {
        self.load_errors.retain(|(failed, _)| *failed != slice);
    }

    /// Refetch the module list now.
    pub async fn refresh_modules(&mut self) -> ViewResult<()> {
        self.ensure_active()?;
        let handle = self.scope.handle();
        let result = handle
            .bind(self.gateway.list_modules(self.project_id))
            .await
            .ok_or(ViewError::Inactive)?;
        match result {
            Ok(modules) => {
                self.apply(Loaded::Modules(Ok(modules)));
                Ok(())
            }
            Err(e) => {
                self.record_failure(LoadedSlice::Modules, &e);
                Err(e.into())
            }
        }
    }

    /// Refetch the phase catalog now.
    pub async fn reload_phases(&mut self) -> ViewResult<()> {
        self.ensure_active()?;
        let handle = self.scope.handle();
        let result = handle
            .bind(self.gateway.list_phases())
            .await
            .ok_or(ViewError::Inactive)?;
        match result {
            Ok(phases) => {
                self.apply(Loaded::Phases(Ok(phases)));
                Ok(())
            }
            Err(e) => {
                self.record_failure(LoadedSlice::Phases, &e);
                Err(e.into())
            }
        }
    }

    // ---- mutations ----

    /// Create a module in this project, then refetch the module list.
    ///
    /// A draft without a phase is assigned the lowest-id loaded phase.
    pub async fn create_module(&mut self, mut draft: ModuleDraft) -> ViewResult<Module> {
        self.ensure_active()?;
        draft.project_id = self.project_id;
        draft.phase_id = Some(resolve_phase_id(draft.phase_id, self.cache.phases())?);
        draft.check()?;

        let handle = self.scope.handle();
        let created = match handle
            .bind(self.gateway.create_module(&draft))
            .await
            .ok_or(ViewError::Inactive)?
        {
            Ok(module) => module,
            Err(e) => {
                notify_failure(&self.bus, "No se pudo crear el módulo", &e);
                return Err(e.into());
            }
        };

        tracing::info!(project_id = self.project_id, module_id = created.id, "Module created");
        self.bus.publish(
            Notification::success("Módulo creado", "El módulo ha sido creado exitosamente")
                .with_subject(Module::KIND, created.id),
        );
        let id = created.id;
        self.cache.apply_module_create(created);
        // A failed refetch is reported through `status`.
        let _ = self.refresh_modules().await;

        self.cache
            .module(id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound { entity: Module::KIND, id }.into())
    }

    /// Replace module `id` and merge the result locally.
    ///
    /// The embedded phase is re-derived from the loaded phases, not taken
    /// from the response. The parent project is refetched in the
    /// background; the module list is not.
    pub async fn update_module(
        &mut self,
        id: DbId,
        mut update: ModuleUpdate,
    ) -> ViewResult<Module> {
        self.ensure_active()?;
        if self.cache.module(id).is_none() {
            return Err(CoreError::NotFound { entity: Module::KIND, id }.into());
        }
        update.phase_id = resolve_phase_id(Some(update.phase_id), self.cache.phases())?;
        update.project_id = self.project_id;
        update.check()?;

        let handle = self.scope.handle();
        let echoed = match handle
            .bind(self.gateway.update_module(id, &update))
            .await
            .ok_or(ViewError::Inactive)?
        {
            Ok(echoed) => echoed,
            Err(e) => {
                notify_failure(&self.bus, "No se pudo actualizar el módulo", &e);
                return Err(e.into());
            }
        };

        let patch = ModulePatch::from(update).with_echoed_phase(echoed.and_then(|m| m.phase));
        let updated = self.cache.apply_module_update(id, patch)?.clone();

        tracing::info!(project_id = self.project_id, module_id = id, "Module updated");
        self.bus.publish(
            Notification::success(
                "Módulo actualizado",
                "El módulo ha sido actualizado exitosamente",
            )
            .with_subject(Module::KIND, id),
        );
        self.spawn_fetch(LoadedSlice::Project);
        Ok(updated)
    }

    /// Ask for confirmation, delete module `id`, then refetch the list.
    pub async fn delete_module(
        &mut self,
        id: DbId,
        confirmer: &dyn Confirmer,
    ) -> ViewResult<DeleteOutcome> {
        self.ensure_active()?;
        let subject = match self.cache.module(id) {
            Some(module) => format!("el módulo {}", module.name),
            None => return Err(CoreError::NotFound { entity: Module::KIND, id }.into()),
        };

        let gateway = Arc::clone(&self.gateway);
        let outcome = confirm_then_delete(confirmer, &subject, move || async move {
            gateway.delete_module(id).await
        })
        .await;

        match &outcome {
            DeleteOutcome::Deleted => {
                self.cache.apply_module_delete(id);
                tracing::info!(project_id = self.project_id, module_id = id, "Module deleted");
                self.bus.publish(
                    Notification::success("Eliminado", "El módulo ha sido eliminado exitosamente")
                        .with_subject(Module::KIND, id),
                );
                let _ = self.refresh_modules().await;
            }
            DeleteOutcome::Failed(e) => {
                notify_failure(&self.bus, "No se pudo eliminar el módulo", e);
            }
            DeleteOutcome::Cancelled => {}
        }
        Ok(outcome)
    }

    fn ensure_active(&self) -> ViewResult<()> {
        if self.scope.is_active() {
            Ok(())
        } else {
            Err(ViewError::Inactive)
        }
    }
}
