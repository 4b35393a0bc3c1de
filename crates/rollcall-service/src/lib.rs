//! Service layer for rollcall: a multi-tenant directory of hierarchically
//! organized teams with per-team rosters and dated attendance tracking.
//!
//! The two load-bearing pieces live here:
//! - the team directory, which keeps a materialized-path index so
//!   descendant/ancestor queries resolve in one ordered range scan, and
//! - the access decision engine, which combines direct ownership with
//!   time-limited, scope-limited share-link tokens into a single allow/deny
//!   decision.
//!
//! Transport, session issuance and the concrete persistence engine are
//! collaborator boundaries ([`SessionResolver`], `rollcall_storage::Store`),
//! not part of this crate.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod service;

pub use auth::{Principal, SessionResolver};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use service::RollcallService;

#[cfg(test)]
mod tests;
