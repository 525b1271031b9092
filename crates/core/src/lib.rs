//! Domain types and pure client-side logic for the project console.
//!
//! Nothing in this crate performs I/O: the gateway and state crates feed
//! it server payloads and user input.

pub mod confirm;
pub mod dashboard;
pub mod dates;
pub mod entity;
pub mod error;
pub mod module;
pub mod pagination;
pub mod phase;
pub mod project;
pub mod status;
pub mod types;
pub mod validation;
