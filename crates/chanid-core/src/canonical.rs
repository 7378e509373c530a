//! Identity canonicalization and content digesting
//!
//! Produces a deterministic, comparison-friendly fingerprint for any
//! Identity so structural equality can be tested as a byte comparison.
//! Semi-structured payload columns are not guaranteed to support correct
//! equality comparison across storage backends; hashing the canonical
//! serialization down to a fixed-width value makes equality indexable.
//!
//! Collisions are accepted as not occurring in practice and are not
//! detected; a collision would cause a false positive match against an
//! unrelated identity.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::errors::{AclError, AclErrorKind, Result};
use crate::model::Identity;

/// Number of bytes in an identity digest (SHA-256)
pub const DIGEST_LEN: usize = 32;

/// Serialize an identity's fields into canonical bytes
///
/// Fields are emitted as JSON with lexicographically sorted names, so two
/// structurally equal identities canonicalize to byte-identical output
/// regardless of construction order.
pub fn canonicalize(identity: &Identity) -> Result<Vec<u8>> {
    let payload = identity.payload()?;
    let obj = payload.as_object().ok_or_else(|| {
        AclError::new(AclErrorKind::Internal)
            .with_op("canonicalize")
            .with_platform(identity.platform().as_str())
            .with_message("Identity payload is not a JSON object")
    })?;

    // BTreeMap fixes the field order independent of payload construction
    let sorted: BTreeMap<&String, &serde_json::Value> = obj.iter().collect();
    serde_json::to_vec(&sorted).map_err(|e| {
        AclError::new(AclErrorKind::Serialization)
            .with_op("canonicalize")
            .with_platform(identity.platform().as_str())
            .with_message(e.to_string())
    })
}

/// Compute the SHA-256 content digest of an identity
///
/// Returns the raw 32-byte digest of the canonical serialization. Stored
/// alongside the payload and indexed, it lets the store answer "is this
/// identity already registered" with a single byte-equality point query.
pub fn digest(identity: &Identity) -> Result<Vec<u8>> {
    let canonical = canonicalize(identity)?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(hasher.finalize().to_vec())
}

/// Hex encoding of an identity digest, for log and error context
pub fn digest_hex(identity: &Identity) -> Result<String> {
    Ok(hex::encode(digest(identity)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AmazonId, CDiscountId, EbayId};

    fn amazon(asin: &str) -> Identity {
        Identity::Amazon(AmazonId {
            asin: asin.to_string(),
            sku: "S1".to_string(),
            site: "US".to_string(),
            merchant_id: "M1".to_string(),
        })
    }

    #[test]
    fn test_digest_length() {
        let d = digest(&amazon("B001")).unwrap();
        assert_eq!(d.len(), DIGEST_LEN);
    }

    #[test]
    fn test_digest_deterministic() {
        let d1 = digest(&amazon("B001")).unwrap();
        let d2 = digest(&amazon("B001")).unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_digest_discriminates() {
        let d1 = digest(&amazon("B001")).unwrap();
        let d2 = digest(&amazon("B002")).unwrap();
        assert_ne!(d1, d2);
    }

    #[test]
    fn test_digest_discriminates_across_platforms() {
        // Same SKU on two platforms must not collide
        let cdiscount = Identity::CDiscount(CDiscountId {
            sku: "S1".to_string(),
            user_id: 999,
        });
        let ebay = Identity::Ebay(EbayId {
            item_id: "S1".to_string(),
            sku: "S1".to_string(),
        });
        assert_ne!(digest(&cdiscount).unwrap(), digest(&ebay).unwrap());
    }

    #[test]
    fn test_canonical_field_order_sorted() {
        let bytes = canonicalize(&amazon("B001")).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let asin_pos = text.find("asin").unwrap();
        let merchant_pos = text.find("merchant_id").unwrap();
        let site_pos = text.find("site").unwrap();
        let sku_pos = text.find("\"sku\"").unwrap();

        assert!(asin_pos < merchant_pos);
        assert!(merchant_pos < site_pos);
        assert!(site_pos < sku_pos);
    }

    #[test]
    fn test_digest_hex_encoding() {
        let hex_digest = digest_hex(&amazon("B001")).unwrap();
        assert_eq!(hex_digest.len(), DIGEST_LEN * 2);
        assert!(hex_digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
