//! Shared helpers for state integration tests.
//!
//! [`FakeGateway`] keeps the remote collections in memory, records every
//! call, and can fail or hold back individual operations so tests control
//! failure and completion order.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use projdesk_core::confirm::{Confirmer, Decision};
use projdesk_core::dashboard::{PhaseModuleCount, TotalModules, TotalProjects};
use projdesk_core::module::{Module, ModuleDraft, ModuleUpdate};
use projdesk_core::phase::{Phase, PhaseDraft};
use projdesk_core::project::{Project, ProjectDraft};
use projdesk_core::types::DbId;
use projdesk_events::{Notification, NotificationBus};
use projdesk_gateway::{EntityGateway, GatewayError, GatewayResult};
use tokio::sync::{broadcast, Semaphore};

// ---------------------------------------------------------------------------
// FakeGateway
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListProjects,
    GetProject,
    CreateProject,
    UpdateProject,
    DeleteProject,
    ListModules,
    CreateModule,
    UpdateModule,
    DeleteModule,
    ListPhases,
    CreatePhase,
    UpdatePhase,
    TotalProjects,
    TotalModules,
    ModulesByPhase,
    ProjectProgress,
}

#[derive(Default)]
struct Remote {
    projects: Vec<Project>,
    modules: Vec<Module>,
    phases: Vec<Phase>,
    modules_by_phase: Vec<PhaseModuleCount>,
}

#[derive(Default)]
pub struct FakeGateway {
    remote: Mutex<Remote>,
    next_id: AtomicI64,
    calls: Mutex<Vec<Op>>,
    completed: Mutex<Vec<Op>>,
    failing: Mutex<HashSet<Op>>,
    gates: Mutex<HashMap<Op, Arc<Semaphore>>>,
    echo_phase: Mutex<Option<Phase>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(100),
            ..Default::default()
        }
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        self.remote.lock().unwrap().projects = projects;
        self
    }

    pub fn with_modules(self, modules: Vec<Module>) -> Self {
        self.remote.lock().unwrap().modules = modules;
        self
    }

    pub fn with_phases(self, phases: Vec<Phase>) -> Self {
        self.remote.lock().unwrap().phases = phases;
        self
    }

    pub fn with_modules_by_phase(self, entries: Vec<PhaseModuleCount>) -> Self {
        self.remote.lock().unwrap().modules_by_phase = entries;
        self
    }

    /// Make every later call of `op` fail with a 500.
    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    /// Let later calls of `op` succeed again.
    pub fn recover(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
    }

    /// Hold calls of `op` until [`release`](Self::release) is called.
    pub fn hold(&self, op: Op) {
        self.gates
            .lock()
            .unwrap()
            .insert(op, Arc::new(Semaphore::new(0)));
    }

    /// Let one held call of `op` proceed.
    pub fn release(&self, op: Op) {
        let gate = self.gates.lock().unwrap().get(&op).cloned();
        if let Some(gate) = gate {
            gate.add_permits(1);
        }
    }

    /// Nested phase to echo from module updates instead of the stored one.
    pub fn echo_phase(&self, phase: Phase) {
        *self.echo_phase.lock().unwrap() = Some(phase);
    }

    pub fn calls(&self, op: Op) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    /// Calls of `op` that got past their gate.
    pub fn completed(&self, op: Op) -> usize {
        self.completed
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == op)
            .count()
    }

    pub fn remote_modules(&self) -> Vec<Module> {
        self.remote.lock().unwrap().modules.clone()
    }

    pub fn remote_projects(&self) -> Vec<Project> {
        self.remote.lock().unwrap().projects.clone()
    }

    async fn enter(&self, op: Op) -> GatewayResult<()> {
        self.calls.lock().unwrap().push(op);
        let gate = self.gates.lock().unwrap().get(&op).cloned();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        self.completed.lock().unwrap().push(op);

        if self.failing.lock().unwrap().contains(&op) {
            return Err(GatewayError::Http {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                body: "boom".to_string(),
            });
        }
        Ok(())
    }

    fn next_id(&self) -> DbId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn not_found() -> GatewayError {
        GatewayError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            body: String::new(),
        }
    }
}

#[async_trait]
impl EntityGateway for FakeGateway {
    async fn list_projects(&self) -> GatewayResult<Vec<Project>> {
        self.enter(Op::ListProjects).await?;
        Ok(self.remote.lock().unwrap().projects.clone())
    }

    async fn get_project(&self, id: DbId) -> GatewayResult<Project> {
        self.enter(Op::GetProject).await?;
        let remote = self.remote.lock().unwrap();
        remote
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_project(&self, draft: &ProjectDraft) -> GatewayResult<Project> {
        self.enter(Op::CreateProject).await?;
        let project = Project {
            id: self.next_id(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            start_date: draft.start_date.clone(),
            end_date: draft.end_date.clone(),
            status: draft.status.clone(),
            created_at: None,
            updated_at: None,
        };
        self.remote.lock().unwrap().projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: DbId,
        body: &ProjectDraft,
    ) -> GatewayResult<Option<Project>> {
        self.enter(Op::UpdateProject).await?;
        let mut remote = self.remote.lock().unwrap();
        let project = remote
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(Self::not_found)?;
        project.name = body.name.clone();
        project.description = body.description.clone();
        project.start_date = body.start_date.clone();
        project.end_date = body.end_date.clone();
        project.status = body.status.clone();
        // The real API answers updates with a status message.
        Ok(None)
    }

    async fn delete_project(&self, id: DbId) -> GatewayResult<()> {
        self.enter(Op::DeleteProject).await?;
        let mut remote = self.remote.lock().unwrap();
        let before = remote.projects.len();
        remote.projects.retain(|p| p.id != id);
        if remote.projects.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn list_modules(&self, project_id: DbId) -> GatewayResult<Vec<Module>> {
        self.enter(Op::ListModules).await?;
        let remote = self.remote.lock().unwrap();
        Ok(remote
            .modules
            .iter()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_module(&self, draft: &ModuleDraft) -> GatewayResult<Module> {
        self.enter(Op::CreateModule).await?;
        let mut remote = self.remote.lock().unwrap();
        let phase_id = draft.phase_id.unwrap_or_default();
        let module = Module {
            id: self.next_id(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            project_id: draft.project_id,
            phase_id,
            start_date: draft.start_date.clone(),
            end_date: draft.end_date.clone(),
            status: draft.status.clone(),
            created_at: None,
            updated_at: None,
            phase: remote.phases.iter().find(|p| p.id == phase_id).cloned(),
        };
        remote.modules.push(module.clone());
        Ok(module)
    }

    async fn update_module(&self, id: DbId, body: &ModuleUpdate) -> GatewayResult<Option<Module>> {
        self.enter(Op::UpdateModule).await?;
        let echo_phase = self.echo_phase.lock().unwrap().clone();
        let mut remote = self.remote.lock().unwrap();
        let stored_phase = remote.phases.iter().find(|p| p.id == body.phase_id).cloned();
        let module = remote
            .modules
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(Self::not_found)?;
        module.name = body.name.clone();
        module.description = body.description.clone();
        module.phase_id = body.phase_id;
        module.start_date = body.start_date.clone();
        module.end_date = body.end_date.clone();
        module.status = body.status.clone();
        module.phase = echo_phase.or(stored_phase);
        Ok(Some(module.clone()))
    }

    async fn delete_module(&self, id: DbId) -> GatewayResult<()> {
        self.enter(Op::DeleteModule).await?;
        let mut remote = self.remote.lock().unwrap();
        let before = remote.modules.len();
        remote.modules.retain(|m| m.id != id);
        if remote.modules.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn list_phases(&self) -> GatewayResult<Vec<Phase>> {
        self.enter(Op::ListPhases).await?;
        Ok(self.remote.lock().unwrap().phases.clone())
    }

    async fn create_phase(&self, draft: &PhaseDraft) -> GatewayResult<Phase> {
        self.enter(Op::CreatePhase).await?;
        let phase = Phase {
            id: self.next_id(),
            name: draft.name.clone(),
            color: draft.color.clone(),
        };
        self.remote.lock().unwrap().phases.push(phase.clone());
        Ok(phase)
    }

    async fn update_phase(&self, id: DbId, body: &PhaseDraft) -> GatewayResult<Option<Phase>> {
        self.enter(Op::UpdatePhase).await?;
        let mut remote = self.remote.lock().unwrap();
        let phase = remote
            .phases
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(Self::not_found)?;
        phase.name = body.name.clone();
        phase.color = body.color.clone();
        Ok(Some(phase.clone()))
    }

    async fn total_projects(&self) -> GatewayResult<TotalProjects> {
        self.enter(Op::TotalProjects).await?;
        let total_projects = self.remote.lock().unwrap().projects.len() as i64;
        Ok(TotalProjects { total_projects })
    }

    async fn total_modules(&self) -> GatewayResult<TotalModules> {
        self.enter(Op::TotalModules).await?;
        let total_modules = self.remote.lock().unwrap().modules.len() as i64;
        Ok(TotalModules { total_modules })
    }

    async fn modules_by_phase(&self) -> GatewayResult<Vec<PhaseModuleCount>> {
        self.enter(Op::ModulesByPhase).await?;
        Ok(self.remote.lock().unwrap().modules_by_phase.clone())
    }

    async fn project_progress(&self) -> GatewayResult<serde_json::Value> {
        self.enter(Op::ProjectProgress).await?;
        Ok(serde_json::json!([{ "name": "Portal", "progress": 40 }]))
    }
}

// ---------------------------------------------------------------------------
// Confirmers
// ---------------------------------------------------------------------------

/// Answers with a fixed decision and remembers what it was asked.
pub struct RecordingConfirmer {
    decision: Decision,
    asked: Mutex<Vec<String>>,
}

impl RecordingConfirmer {
    pub fn confirming() -> Self {
        Self {
            decision: Decision::Confirmed,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            decision: Decision::Cancelled,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for RecordingConfirmer {
    async fn confirm_destroy(&self, subject: &str) -> Decision {
        self.asked.lock().unwrap().push(subject.to_string());
        self.decision
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn project(id: DbId, status: &str) -> Project {
    Project {
        id,
        name: format!("Project {id}"),
        description: "A project".to_string(),
        start_date: "2024-01-10T16:00:00.000Z".to_string(),
        end_date: "2024-06-30T16:00:00.000Z".to_string(),
        status: status.to_string(),
        created_at: None,
        updated_at: None,
    }
}

pub fn phase(id: DbId, name: &str, color: &str) -> Phase {
    Phase {
        id,
        name: name.to_string(),
        color: color.to_string(),
    }
}

pub fn phases() -> Vec<Phase> {
    vec![
        phase(1, "Análisis", "#111111"),
        phase(2, "Diseño", "#222222"),
        phase(3, "Pruebas", "#333333"),
    ]
}

/// A module whose embedded phase matches `phases()`.
pub fn module(id: DbId, project_id: DbId, phase_id: DbId) -> Module {
    Module {
        id,
        name: format!("Module {id}"),
        description: "A module".to_string(),
        project_id,
        phase_id,
        start_date: "2024-02-01T16:00:00.000Z".to_string(),
        end_date: "2024-03-01T16:00:00.000Z".to_string(),
        status: "Pendiente".to_string(),
        created_at: None,
        updated_at: None,
        phase: phases().into_iter().find(|p| p.id == phase_id),
    }
}

pub fn bus() -> (Arc<NotificationBus>, broadcast::Receiver<Notification>) {
    let bus = Arc::new(NotificationBus::default());
    let rx = bus.subscribe();
    (bus, rx)
}

/// Every notification published so far.
pub fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    let mut received = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        received.push(notification);
    }
    received
}
