use projdesk_core::error::CoreError;
use projdesk_gateway::GatewayError;

/// Errors surfaced by view operations.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// A gateway call failed; cached state is unchanged.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Input was rejected before any request was made.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The view was torn down before the operation finished.
    #[error("View is no longer active")]
    Inactive,
}

/// Convenience type alias for view operation results.
pub type ViewResult<T> = Result<T, ViewError>;
