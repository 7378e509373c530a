//! chanid core - identity resolution domain layer
//!
//! This crate provides the domain model for resolving platform-specific
//! marketplace identities to a single canonical integer ID:
//! - The closed set of supported Identity variants and their platform tags
//! - Deterministic canonicalization and content digesting of identities
//! - The Mapping record that associates a canonical ID with one identity
//! - A structured error facility with a stable kind/code taxonomy
//! - The tracing-based logging facility shared by all components

pub mod canonical;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use errors::{AclError, AclErrorKind, Result};
pub use model::{AmazonId, CDiscountId, EbayId, Identity, Mapping, Platform};
