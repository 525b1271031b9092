//! Project and module status labels.
//!
//! Status is an open string enum: the server may introduce new labels, so
//! values stay plain strings and unknown labels render with a neutral color.

/// Status assigned to new projects and modules.
pub const STATUS_PENDING: &str = "Pendiente";
pub const STATUS_IN_PROGRESS: &str = "En progreso";
pub const STATUS_COMPLETED: &str = "Completado";
pub const STATUS_DELAYED: &str = "Retrasado";

/// Statuses offered by create/update forms, in display order.
pub const KNOWN_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_DELAYED,
];

/// Badge color for a status label.
///
/// Both the Spanish labels and their English equivalents are recognized;
/// anything else is gray.
pub fn status_color(status: &str) -> &'static str {
    match status.trim() {
        "Completado" | "Completed" => "green",
        "En progreso" | "In Progress" => "blue",
        "Pendiente" | "Pending" => "orange",
        "Retrasado" | "Delayed" => "red",
        _ => "gray",
    }
}
