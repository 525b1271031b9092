//! Views over the entity cache.
//!
//! Each view owns its own [`EntityCache`](crate::cache::EntityCache): the
//! cache is built when the view activates and discarded with it.

pub mod phases;
pub mod project_detail;
pub mod project_list;

pub use phases::PhaseCatalogView;
pub use project_detail::{LoadedSlice, ProjectDetailView};
pub use project_list::ProjectListView;

use projdesk_events::{Notification, NotificationBus};

/// Whether a view can render its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Ready,
    /// A read failed; the message replaces the normal content.
    Failed(String),
}

impl ViewStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewStatus::Ready)
    }
}

/// Publish the failure toast for a mutation that did not go through.
fn notify_failure(bus: &NotificationBus, text: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(error = %error, "{text}");
    bus.publish(Notification::error("Error", text));
}
