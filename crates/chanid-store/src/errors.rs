//! Error handling for chanid-store
//!
//! Wraps chanid-core AclError with store-specific helpers

use chanid_core::errors::{AclError, AclErrorKind};

/// Result type alias using AclError
pub type Result<T> = std::result::Result<T, AclError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> AclError {
    AclError::new(AclErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create an invariant violation error for a lookup that matched more rows
/// than the unique index permits
pub fn invariant_violation(platform: &str, digest_hex: &str, row_count: usize) -> AclError {
    AclError::new(AclErrorKind::InvariantViolation)
        .with_op("acl_get_id")
        .with_platform(platform)
        .with_digest(digest_hex)
        .with_message(format!(
            "{} rows match ({}, {}); the unique index was violated out of band",
            row_count, platform, digest_hex
        ))
}

/// Create a database error from rusqlite::Error
///
/// Unique-index violations carry their own kind so callers can tell a
/// duplicate registration apart from an ordinary persistence failure.
pub fn from_rusqlite(err: rusqlite::Error) -> AclError {
    let kind = if is_unique_violation(&err) {
        AclErrorKind::UniquenessViolation
    } else {
        AclErrorKind::Persistence
    };
    AclError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> AclError {
    AclError::new(AclErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}
