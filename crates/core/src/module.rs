//! Module entity, request bodies and the phase-snapshot rules.
//!
//! A module carries a denormalized copy of its phase (`phase`). The copy is
//! a projection of the phase collection: whoever holds both must re-derive
//! it with [`Module::derive_phase`] after every merge instead of trusting
//! the payload.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{Entity, Patch};
use crate::error::CoreError;
use crate::phase::Phase;
use crate::status::STATUS_PENDING;
use crate::types::{DbId, Timestamp};
use crate::validation;

/// A module as returned by `GET /modules/project/{projectId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub project_id: DbId,
    pub phase_id: DbId,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    /// Snapshot of the phase with id `phase_id`.
    #[serde(default)]
    pub phase: Option<Phase>,
}

/// Body for `POST /modules`.
///
/// `phase_id` may be left empty by the caller; it must be resolved against
/// the loaded phases with [`resolve_phase_id`] before the draft is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_draft_dates"))]
pub struct ModuleDraft {
    pub project_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_id: Option<DbId>,
    #[validate(custom(function = "validation::non_blank"))]
    pub name: String,
    #[validate(custom(function = "validation::non_blank"))]
    pub description: String,
    #[validate(custom(function = "validation::known_date"))]
    pub start_date: String,
    #[validate(custom(function = "validation::known_date"))]
    pub end_date: String,
    #[validate(custom(function = "validation::non_blank"))]
    pub status: String,
}

/// Full-replacement body for `PUT /modules/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_dates"))]
pub struct ModuleUpdate {
    pub project_id: DbId,
    pub phase_id: DbId,
    #[validate(custom(function = "validation::non_blank"))]
    pub name: String,
    #[validate(custom(function = "validation::non_blank"))]
    pub description: String,
    #[validate(custom(function = "validation::known_date"))]
    pub start_date: String,
    #[validate(custom(function = "validation::known_date"))]
    pub end_date: String,
    #[validate(custom(function = "validation::non_blank"))]
    pub status: String,
}

/// A partial change merged into a cached module.
///
/// `phase` is the nested phase the server echoed, if any. It is only a
/// fallback for when the phase collection has no matching record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModulePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub phase_id: Option<DbId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub phase: Option<Phase>,
}

fn validate_draft_dates(draft: &ModuleDraft) -> Result<(), validator::ValidationError> {
    validation::ordered_dates(&draft.start_date, &draft.end_date)
}

fn validate_update_dates(update: &ModuleUpdate) -> Result<(), validator::ValidationError> {
    validation::ordered_dates(&update.start_date, &update.end_date)
}

impl ModuleDraft {
    /// A draft for `project_id` with no phase chosen and `Pendiente` status.
    pub fn new(
        project_id: DbId,
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            phase_id: None,
            name: name.into(),
            description: description.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            status: STATUS_PENDING.to_string(),
        }
    }

    pub fn with_phase(mut self, phase_id: DbId) -> Self {
        self.phase_id = Some(phase_id);
        self
    }

    pub fn check(&self) -> Result<(), CoreError> {
        Ok(self.validate()?)
    }
}

impl ModuleUpdate {
    pub fn check(&self) -> Result<(), CoreError> {
        Ok(self.validate()?)
    }
}

impl Module {
    /// The full-replacement body reproducing this module's editable fields.
    pub fn to_update(&self) -> ModuleUpdate {
        ModuleUpdate {
            project_id: self.project_id,
            phase_id: self.phase_id,
            name: self.name.clone(),
            description: self.description.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            status: self.status.clone(),
        }
    }

    /// Recompute the phase snapshot from `phases`.
    ///
    /// The local record for `phase_id` wins; `fallback` (a server echo) is
    /// used only when no local record exists and it matches `phase_id`.
    /// With neither, the existing snapshot is kept if it still matches.
    pub fn derive_phase(&mut self, phases: &[Phase], fallback: Option<Phase>) {
        if let Some(local) = phases.iter().find(|p| p.id == self.phase_id) {
            self.phase = Some(local.clone());
            return;
        }
        if let Some(echo) = fallback.filter(|p| p.id == self.phase_id) {
            self.phase = Some(echo);
            return;
        }
        if self.phase.as_ref().is_some_and(|p| p.id != self.phase_id) {
            self.phase = None;
        }
    }
}

impl Entity for Module {
    const KIND: &'static str = "module";

    fn id(&self) -> DbId {
        self.id
    }
}

/// Scalar fields only; the phase snapshot is re-derived by the caller.
impl Patch<Module> for ModulePatch {
    fn apply_to(self, target: &mut Module) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(phase_id) = self.phase_id {
            target.phase_id = phase_id;
        }
        if let Some(start_date) = self.start_date {
            target.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            target.end_date = end_date;
        }
        if let Some(status) = self.status {
            target.status = status;
        }
    }
}

impl From<ModuleUpdate> for ModulePatch {
    fn from(update: ModuleUpdate) -> Self {
        Self {
            name: Some(update.name),
            description: Some(update.description),
            phase_id: Some(update.phase_id),
            start_date: Some(update.start_date),
            end_date: Some(update.end_date),
            status: Some(update.status),
            phase: None,
        }
    }
}

impl ModulePatch {
    /// Attach the nested phase a server response carried.
    pub fn with_echoed_phase(mut self, phase: Option<Phase>) -> Self {
        self.phase = phase;
        self
    }
}

/// The phase a new module starts in when the user picks none: the
/// lowest-id loaded phase.
pub fn default_phase_id(phases: &[Phase]) -> Option<DbId> {
    phases.iter().map(|p| p.id).min()
}

/// Check a requested phase against the loaded phases, or pick the default.
pub fn resolve_phase_id(requested: Option<DbId>, phases: &[Phase]) -> Result<DbId, CoreError> {
    match requested {
        Some(id) if phases.iter().any(|p| p.id == id) => Ok(id),
        Some(id) => Err(CoreError::UnknownPhase(id)),
        None => default_phase_id(phases).ok_or_else(|| {
            CoreError::Validation("no phases are loaded to assign the module to".to_string())
        }),
    }
}
