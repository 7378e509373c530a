//! Mapping domain model
//!
//! A Mapping is the persisted unit associating a canonical integer ID with
//! one platform-specific identity. The digest is computed from the canonical
//! payload serialization at construction time and is never independently
//! settable; the `(platform, digest)` pair carries the store's sole
//! uniqueness constraint. The `mapped_id` alone is deliberately not unique:
//! several rows sharing one `mapped_id` is how a single canonical entity
//! federates identities across platforms.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::canonical;
use crate::errors::Result;
use crate::model::{Identity, Platform};

/// Persisted association between a canonical ID and one platform identity
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    /// Externally assigned canonical integer identifier (not unique by
    /// itself; federation shares it across platforms)
    pub mapped_id: i64,

    /// Tag identifying which Identity variant this row encodes
    pub platform: Platform,

    /// The identity's fields as an order-insignificant JSON object
    pub payload: JsonValue,

    /// SHA-256 digest of the canonical payload serialization (derived)
    pub digest: Vec<u8>,

    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    /// Create a new mapping for the given canonical ID and identity
    ///
    /// Sets the platform via classification, the payload via field
    /// serialization, and the digest via canonical hashing.
    pub fn new(mapped_id: i64, identity: &Identity) -> Result<Self> {
        Ok(Self {
            mapped_id,
            platform: identity.platform(),
            payload: identity.payload()?,
            digest: canonical::digest(identity)?,
            created_at: Utc::now(),
        })
    }

    /// Rebuild a mapping from stored row parts
    ///
    /// Used by the persistence layer when rehydrating rows; trusts the
    /// stored digest rather than recomputing it.
    pub fn from_row(
        mapped_id: i64,
        platform: Platform,
        payload: JsonValue,
        digest: Vec<u8>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            mapped_id,
            platform,
            payload,
            digest,
            created_at,
        }
    }

    /// Reconstruct the identity this row encodes
    pub fn identity(&self) -> Result<Identity> {
        Identity::from_parts(self.platform, &self.payload)
    }

    /// Hex encoding of the digest, for log and error context
    pub fn digest_hex(&self) -> String {
        hex::encode(&self.digest)
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mapping(mapped_id={}, platform={}, digest={})",
            self.mapped_id,
            self.platform,
            self.digest_hex()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AmazonId, CDiscountId, EbayId};

    fn amazon_fixture() -> Identity {
        Identity::Amazon(AmazonId {
            asin: "B001".to_string(),
            sku: "S1".to_string(),
            site: "US".to_string(),
            merchant_id: "M1".to_string(),
        })
    }

    #[test]
    fn test_mapping_new_derives_fields() {
        let identity = amazon_fixture();
        let mapping = Mapping::new(100, &identity).unwrap();

        assert_eq!(mapping.mapped_id, 100);
        assert_eq!(mapping.platform, Platform::Amazon);
        assert_eq!(mapping.digest, canonical::digest(&identity).unwrap());
        assert_eq!(mapping.payload, identity.payload().unwrap());
    }

    #[test]
    fn test_mapping_identity_round_trip() {
        for identity in [
            amazon_fixture(),
            Identity::CDiscount(CDiscountId {
                sku: "S9".to_string(),
                user_id: 4242,
            }),
            Identity::Ebay(EbayId {
                item_id: "E1".to_string(),
                sku: "S1".to_string(),
            }),
        ] {
            let mapping = Mapping::new(7, &identity).unwrap();
            assert_eq!(mapping.identity().unwrap(), identity);
        }
    }

    #[test]
    fn test_same_identity_same_digest() {
        let m1 = Mapping::new(1, &amazon_fixture()).unwrap();
        let m2 = Mapping::new(2, &amazon_fixture()).unwrap();
        // Different canonical IDs, identical content fingerprint
        assert_eq!(m1.digest, m2.digest);
    }

    #[test]
    fn test_digest_hex() {
        let mapping = Mapping::new(1, &amazon_fixture()).unwrap();
        assert_eq!(mapping.digest_hex().len(), canonical::DIGEST_LEN * 2);
    }
}
