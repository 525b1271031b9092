//! Lifetime of an active view.
//!
//! A [`ViewScope`] is owned by a view. Background work started on the
//! view's behalf holds a [`ScopeHandle`] and runs its futures through
//! [`ScopeHandle::bind`]; once the scope is closed or dropped, pending work
//! resolves to `None` and its result is never merged.

use std::future::Future;

use tokio_util::sync::{CancellationToken, DropGuard};

/// Cancels every bound future when closed or dropped.
pub struct ViewScope {
    token: CancellationToken,
    _guard: DropGuard,
}

impl ViewScope {
    pub fn new() -> Self {
        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();
        Self {
            token,
            _guard: guard,
        }
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            token: self.token.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Deactivate the view without dropping it.
    pub fn close(&self) {
        self.token.cancel();
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable reference to a [`ViewScope`] for background tasks.
#[derive(Clone)]
pub struct ScopeHandle {
    token: CancellationToken,
}

impl ScopeHandle {
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Run `fut` until it completes or the scope closes, whichever is first.
    pub async fn bind<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = fut => Some(output),
        }
    }

    /// Resolves once the scope is closed.
    pub async fn closed(&self) {
        self.token.cancelled().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn bound_future_completes_while_active() {
        let scope = ViewScope::new();
        assert_eq!(scope.handle().bind(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn dropping_scope_discards_pending_work() {
        let scope = ViewScope::new();
        let handle = scope.handle();
        let task = tokio::spawn(async move {
            handle
                .bind(tokio::time::sleep(Duration::from_secs(30)))
                .await
        });
        drop(scope);
        assert_eq!(task.await.unwrap(), None);
    }

    #[tokio::test]
    async fn closed_scope_rejects_new_work() {
        let scope = ViewScope::new();
        let handle = scope.handle();
        scope.close();
        assert!(!scope.is_active());
        assert!(!handle.is_active());
        assert_eq!(handle.bind(async { 1 }).await, None);
        handle.closed().await;
    }
}
