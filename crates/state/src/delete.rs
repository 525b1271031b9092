//! Confirm-then-delete flow shared by the project and module views.

use std::future::Future;

use projdesk_core::confirm::{Confirmer, Decision};
use projdesk_gateway::{GatewayError, GatewayResult};

/// How a destructive action ended.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The user confirmed and the server accepted the delete.
    Deleted,
    /// The user declined; no request was sent.
    Cancelled,
    /// The user confirmed but the request failed. Nothing was removed.
    Failed(GatewayError),
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }
}

/// Ask `confirmer` about `subject` and only then run `remove`.
///
/// `remove` is never invoked when the user cancels.
pub async fn confirm_then_delete<F, Fut>(
    confirmer: &dyn Confirmer,
    subject: &str,
    remove: F,
) -> DeleteOutcome
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = GatewayResult<()>>,
{
    match confirmer.confirm_destroy(subject).await {
        Decision::Cancelled => {
            tracing::debug!(subject, "Delete cancelled by user");
            DeleteOutcome::Cancelled
        }
        Decision::Confirmed => match remove().await {
            Ok(()) => DeleteOutcome::Deleted,
            Err(e) => {
                tracing::warn!(subject, error = %e, "Delete request failed");
                DeleteOutcome::Failed(e)
            }
        },
    }
}
