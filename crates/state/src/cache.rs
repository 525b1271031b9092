//! In-memory entity collections and the reconciler that keeps them
//! consistent across create/update/delete results.
//!
//! An [`EntityCache`] belongs to exactly one view and lives as long as it.
//! Rendering and aggregation read the collections through slices; only the
//! `set_*`/`apply_*` methods here mutate them.
//!
//! Phases are the single source of truth for a module's embedded phase
//! snapshot. Every merge that touches a module or a phase re-derives the
//! affected snapshots from the phase collection.

use projdesk_core::entity::{Entity, Patch};
use projdesk_core::error::CoreError;
use projdesk_core::module::{Module, ModulePatch};
use projdesk_core::phase::{Phase, PhaseDraft};
use projdesk_core::project::{Project, ProjectDraft};
use projdesk_core::types::DbId;

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// An ordered collection with unique ids.
#[derive(Debug, Clone)]
pub struct Collection<T: Entity> {
    items: Vec<T>,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Collection<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: DbId) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: DbId) -> Option<&mut T> {
        self.items.iter_mut().find(|e| e.id() == id)
    }

    /// Replace the whole collection. A repeated id keeps its first position
    /// and its last value.
    fn replace_all(&mut self, items: Vec<T>) {
        self.items.clear();
        for item in items {
            self.upsert(item);
        }
    }

    /// Append, or replace in place if the id is already present. Returns
    /// the entity's position.
    fn upsert(&mut self, entity: T) -> usize {
        let id = entity.id();
        match self.items.iter().position(|e| e.id() == id) {
            Some(index) => {
                self.items[index] = entity;
                index
            }
            None => {
                self.items.push(entity);
                self.items.len() - 1
            }
        }
    }

    fn merge<P: Patch<T>>(&mut self, id: DbId, patch: P) -> Result<&mut T, CoreError> {
        let entity = self
            .get_mut(id)
            .ok_or(CoreError::NotFound { entity: T::KIND, id })?;
        patch.apply_to(entity);
        Ok(entity)
    }

    fn remove(&mut self, id: DbId) -> Option<T> {
        let index = self.items.iter().position(|e| e.id() == id)?;
        Some(self.items.remove(index))
    }
}

// ---------------------------------------------------------------------------
// EntityCache
// ---------------------------------------------------------------------------

/// Projects, the modules of the viewed project, and all phases.
#[derive(Debug, Clone, Default)]
pub struct EntityCache {
    projects: Collection<Project>,
    modules: Collection<Module>,
    phases: Collection<Phase>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- reads ----

    pub fn projects(&self) -> &[Project] {
        self.projects.as_slice()
    }

    pub fn modules(&self) -> &[Module] {
        self.modules.as_slice()
    }

    pub fn phases(&self) -> &[Phase] {
        self.phases.as_slice()
    }

    pub fn project(&self, id: DbId) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn module(&self, id: DbId) -> Option<&Module> {
        self.modules.get(id)
    }

    pub fn phase(&self, id: DbId) -> Option<&Phase> {
        self.phases.get(id)
    }

    // ---- projects ----

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects.replace_all(projects);
    }

    /// Insert a created (or freshly fetched) project.
    pub fn apply_project_create(&mut self, project: Project) -> &Project {
        let index = self.projects.upsert(project);
        &self.projects.items[index]
    }

    /// Merge a full-replacement body into the cached project.
    pub fn apply_project_update(
        &mut self,
        id: DbId,
        body: ProjectDraft,
    ) -> Result<&Project, CoreError> {
        self.projects.merge(id, body).map(|p| &*p)
    }

    pub fn apply_project_delete(&mut self, id: DbId) -> Option<Project> {
        self.projects.remove(id)
    }

    // ---- modules ----

    /// Replace the module collection, deriving every phase snapshot.
    pub fn set_modules(&mut self, modules: Vec<Module>) {
        self.modules.replace_all(modules);
        let phases = self.phases.as_slice();
        for module in self.modules.items.iter_mut() {
            let echoed = module.phase.take();
            module.derive_phase(phases, echoed);
        }
    }

    pub fn apply_module_create(&mut self, mut module: Module) -> &Module {
        let echoed = module.phase.take();
        module.derive_phase(self.phases.as_slice(), echoed);
        let index = self.modules.upsert(module);
        &self.modules.items[index]
    }

    /// Merge scalar fields, then re-derive the phase snapshot from the
    /// phase collection. The echoed phase in `patch` only counts when the
    /// collection has no record for the module's phase id.
    pub fn apply_module_update(
        &mut self,
        id: DbId,
        patch: ModulePatch,
    ) -> Result<&Module, CoreError> {
        let echoed = patch.phase.clone();
        let module = self.modules.merge(id, patch)?;
        module.derive_phase(self.phases.as_slice(), echoed);
        Ok(&*module)
    }

    pub fn apply_module_delete(&mut self, id: DbId) -> Option<Module> {
        self.modules.remove(id)
    }

    // ---- phases ----

    /// Replace the phase collection and refresh every module snapshot.
    pub fn set_phases(&mut self, phases: Vec<Phase>) {
        self.phases.replace_all(phases);
        self.rederive_snapshots(None);
    }

    pub fn apply_phase_create(&mut self, phase: Phase) -> &Phase {
        let id = phase.id;
        let index = self.phases.upsert(phase);
        self.rederive_snapshots(Some(id));
        &self.phases.items[index]
    }

    /// Merge a name/color change and refresh snapshots of modules in it.
    pub fn apply_phase_update(&mut self, id: DbId, body: PhaseDraft) -> Result<&Phase, CoreError> {
        self.phases.merge(id, body)?;
        self.rederive_snapshots(Some(id));
        self.phases
            .get(id)
            .ok_or(CoreError::NotFound { entity: Phase::KIND, id })
    }

    /// Recompute module snapshots, all of them or those in phase `only`.
    fn rederive_snapshots(&mut self, only: Option<DbId>) {
        let phases = self.phases.as_slice();
        for module in self.modules.items.iter_mut() {
            if only.is_some_and(|id| module.phase_id != id) {
                continue;
            }
            module.derive_phase(phases, None);
        }
    }
}
