//! Migration checksums
//!
//! Each applied migration's SQL is fingerprinted with SHA-256 so a later
//! run can detect that the embedded SQL diverged from what the database
//! was actually built with.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a migration's SQL text
pub fn compute_checksum(sql: &str) -> String {
    hex::encode(Sha256::digest(sql.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_shape_and_determinism() {
        let c1 = compute_checksum("CREATE TABLE t (id INTEGER)");
        let c2 = compute_checksum("CREATE TABLE t (id INTEGER)");
        assert_eq!(c1, c2);
        assert_eq!(c1.len(), 64);
    }

    #[test]
    fn test_checksum_sensitive_to_content() {
        assert_ne!(compute_checksum("SELECT 1"), compute_checksum("SELECT 2"));
    }
}
