//! Client-side domain state for the project console.
//!
//! - [`cache::EntityCache`]: the project/module/phase collections of one
//!   view and the reconciler that merges mutation results into them.
//! - [`scope::ViewScope`]: ties background fetches to a view's lifetime.
//! - [`viewport::Viewport`]: resize signal driving list pagination.
//! - [`delete`]: the confirm-then-delete protocol.
//! - [`views`]: project list, project detail and phase catalog views.
//! - [`dashboard::DashboardAggregator`]: independent-failure dashboard fan-out.

pub mod cache;
pub mod dashboard;
pub mod delete;
pub mod error;
pub mod scope;
pub mod viewport;
pub mod views;

pub use error::{ViewError, ViewResult};
