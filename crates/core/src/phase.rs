//! Phase entity and request bodies.
//!
//! Phases are shared by every module and are never deleted; only their
//! name and color change.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{Entity, Patch};
use crate::error::CoreError;
use crate::types::DbId;
use crate::validation;

/// Color given to a phase created without an explicit choice.
pub const DEFAULT_PHASE_COLOR: &str = "#000000";

/// A named, colored stage a module moves through.
///
/// The same shape is embedded in modules as their phase snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

/// Body for `POST /phases` and `PUT /phases/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PhaseDraft {
    #[validate(custom(function = "validation::non_blank"))]
    pub name: String,
    #[validate(custom(function = "validation::hex_color"))]
    pub color: String,
}

impl PhaseDraft {
    /// A draft with the default black color.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: DEFAULT_PHASE_COLOR.to_string(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn check(&self) -> Result<(), CoreError> {
        Ok(self.validate()?)
    }
}

impl Phase {
    /// The `PUT` body that keeps the name and replaces the color.
    pub fn recolored(&self, color: impl Into<String>) -> PhaseDraft {
        PhaseDraft {
            name: self.name.clone(),
            color: color.into(),
        }
    }
}

impl Entity for Phase {
    const KIND: &'static str = "phase";

    fn id(&self) -> DbId {
        self.id
    }
}

impl Patch<Phase> for PhaseDraft {
    fn apply_to(self, target: &mut Phase) {
        target.name = self.name;
        target.color = self.color;
    }
}
