//! Entity gateway for the project console's REST API.
//!
//! [`EntityGateway`] is the seam the state layer talks to; [`RestGateway`]
//! implements it over HTTP with [`reqwest`]. The gateway keeps no state,
//! performs no retries and caches nothing.

pub mod error;
pub mod gateway;
pub mod rest;

pub use error::{GatewayError, GatewayResult, Resource};
pub use gateway::EntityGateway;
pub use rest::{RestGateway, NO_MODULES_MESSAGE};
