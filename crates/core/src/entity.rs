//! Traits shared by every cached entity type.

use crate::types::DbId;

/// A record keyed by a server-assigned id.
pub trait Entity: Clone {
    /// Singular entity name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> DbId;
}

/// A change that can be merged into an existing `T` in place.
pub trait Patch<T> {
    fn apply_to(self, target: &mut T);
}
