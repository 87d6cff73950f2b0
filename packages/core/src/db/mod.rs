//! Persistence Layer
//!
//! The editor core does not own storage; it talks to a [`DocumentStore`].
//!
//! - [`InMemoryStore`] - process-local map, for tests and previews
//! - [`JsonFileStore`] - one JSON file per document under a content directory
//! - [`FallbackStore`] - primary/secondary pair that switches on backend failure
//!
//! Stores report failures as [`StoreError`]; nothing in this layer retries on
//! its own except the fallback switch.

mod document_store;
mod error;
mod fallback_store;
mod file_store;
mod memory_store;

pub use document_store::DocumentStore;
pub use error::{StoreError, StoreResult};
pub use fallback_store::FallbackStore;
pub use file_store::JsonFileStore;
pub use memory_store::InMemoryStore;
