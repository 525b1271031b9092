//! Project entity and request bodies.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{Entity, Patch};
use crate::error::CoreError;
use crate::status::STATUS_PENDING;
use crate::types::{DbId, Timestamp};
use crate::validation;

/// A project as returned by `GET /projects` and `GET /projects/{id}`.
///
/// Modules are never embedded; they are listed per project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Body for `POST /projects` and, as a full replacement, `PUT /projects/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_project_dates"))]
pub struct ProjectDraft {
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

fn validate_project_dates(draft: &ProjectDraft) -> Result<(), validator::ValidationError> {
    validation::ordered_dates(&draft.start_date, &draft.end_date)
}

impl ProjectDraft {
    /// A draft with the default `Pendiente` status.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            status: STATUS_PENDING.to_string(),
        }
    }

    /// Run the field rules, converting failures into [`CoreError::Validation`].
    pub fn check(&self) -> Result<(), CoreError> {
        Ok(self.validate()?)
    }
}

impl Project {
    /// The full-replacement body that reproduces this project's editable fields.
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            status: self.status.clone(),
        }
    }
}

impl Entity for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> DbId {
        self.id
    }
}

/// A full replacement overwrites every editable field; id and timestamps stay.
impl Patch<Project> for ProjectDraft {
    fn apply_to(self, target: &mut Project) {
        target.name = self.name;
        target.description = self.description;
        target.start_date = self.start_date;
        target.end_date = self.end_date;
        target.status = self.status;
    }
}
