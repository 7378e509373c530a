//! chanid store - SQLite persistence for identity resolution
//!
//! Provides:
//! - SQLite schema with an embedded migrations framework
//! - The Acl resolution store: add / get_id / get_identity over the
//!   mappings table, with uniqueness enforced by a `(platform, digest)`
//!   unique index rather than application-level check-then-insert
//! - Connection helpers with an explicit, passed-in handle (no
//!   process-wide engine state)

pub mod acl;
pub mod db;
pub mod errors;
pub mod migrations;

// Re-export key types
pub use acl::Acl;
pub use errors::Result;
