//! Storage abstraction for rollcall.
//!
//! Backend crates (e.g., rollcall-store-memory) implement the [`Store`] trait
//! so the service layer doesn't depend on any specific engine or schema
//! details.

use thiserror::Error;

mod store;
pub mod types;

pub use store::Store;
#[cfg(feature = "test-support")]
pub use store::MockStore;
pub use types::*;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("conflict")]
    Conflict,
    #[error("backend error: {0}")]
    Backend(String),
}
