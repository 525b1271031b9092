//! User-facing notifications for the project console.
//!
//! - [`NotificationBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`Notification`]: a success/error/info message about an entity
//!   mutation, rendered by the front end as a toast or status line.

pub mod bus;

pub use bus::{Notification, NotificationBus, NotificationLevel};
