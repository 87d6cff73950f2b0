//! Business Services
//!
//! Services coordinate the Content Model with the persistence layer:
//!
//! - `EditingSession` - one document being edited, with optimistic save/publish
//! - `DocumentCatalogue` - published listings and search
//! - `ClipboardService` - short-lived shared code snippets
//! - `AdminGate` - single-password admin login

pub mod auth;
pub mod catalogue;
pub mod clipboard_service;
pub mod editing_session;
pub mod error;

pub use auth::{AdminGate, AdminSession};
pub use catalogue::DocumentCatalogue;
pub use clipboard_service::ClipboardService;
pub use editing_session::{join_save, EditingSession};
pub use error::ServiceError;
