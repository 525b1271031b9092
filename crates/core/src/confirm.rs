//! Confirmation protocol gating destructive actions.
//!
//! A delete is a two-step exchange: ask a [`Confirmer`] for a [`Decision`],
//! then act only on [`Decision::Confirmed`]. Front ends supply an
//! interactive confirmer; tests and non-interactive runs use
//! [`FixedDecision`].

use async_trait::async_trait;
use serde::Serialize;

/// Outcome of a confirmation request. Declining is a normal result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Confirmed,
    Cancelled,
}

impl Decision {
    pub fn is_confirmed(self) -> bool {
        self == Decision::Confirmed
    }
}

/// Something that can ask the user whether to destroy `subject`.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm_destroy(&self, subject: &str) -> Decision;
}

/// A confirmer that always answers the same way.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub Decision);

#[async_trait]
impl Confirmer for FixedDecision {
    async fn confirm_destroy(&self, _subject: &str) -> Decision {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_decision_answers_consistently() {
        let yes = FixedDecision(Decision::Confirmed);
        let no = FixedDecision(Decision::Cancelled);
        assert!(yes.confirm_destroy("module Auth").await.is_confirmed());
        assert!(!no.confirm_destroy("module Auth").await.is_confirmed());
    }
}
