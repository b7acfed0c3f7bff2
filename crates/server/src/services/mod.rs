//! Service layer: the operations the mobile clients call.
//!
//! Each service is a thin, typed layer over the hosted backend — validate
//! input, make the backend call(s), convert wire records to domain types.
//! There is no retry, no transactionality, and no offline layer; the
//! backend's own schema constraints are the final guard.

pub mod auth;
pub mod catalog;
pub mod uploads;

pub use auth::{AuthError, AuthService, AuthSession};
pub use catalog::{CatalogError, CatalogService};
pub use uploads::{UploadError, UploadOutcome, UploadService};
