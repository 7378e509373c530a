//! Identity variant model
//!
//! This module defines the closed set of supported external identity shapes,
//! one per marketplace platform. An Identity is plain structured data: it
//! carries no derived state, is immutable once constructed, and compares
//! field by field. Classification and reconstruction dispatch exhaustively
//! over the variant set, so adding a platform is a compile-time checked
//! change rather than a runtime type inspection.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::errors::{AclError, AclErrorKind, Result};

/// Amazon listing identity: ASIN plus seller-scoped qualifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AmazonId {
    pub asin: String,
    pub sku: String,
    pub site: String,
    pub merchant_id: String,
}

/// CDiscount listing identity: SKU scoped by seller account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CDiscountId {
    pub sku: String,
    pub user_id: i64,
}

/// eBay listing identity: item number plus SKU
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EbayId {
    pub item_id: String,
    pub sku: String,
}

/// A platform-specific external identity
///
/// The closed set of supported shapes. Each variant uniquely describes an
/// external entity's reference within its platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identity {
    Amazon(AmazonId),
    CDiscount(CDiscountId),
    Ebay(EbayId),
}

/// Tag identifying which Identity variant a stored row encodes
///
/// The wire names ("Amazon", "CDiscount", "eBay") are persisted in the
/// `platform` column and must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Amazon,
    CDiscount,
    Ebay,
}

impl Platform {
    /// Get the stable wire name for this platform
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Amazon => "Amazon",
            Platform::CDiscount => "CDiscount",
            Platform::Ebay => "eBay",
        }
    }

    /// Parse a stored platform tag
    ///
    /// An unknown tag means the store was written by a newer (or corrupted)
    /// deployment; this is a fatal mismatch, not a normal lookup miss.
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "Amazon" => Ok(Platform::Amazon),
            "CDiscount" => Ok(Platform::CDiscount),
            "eBay" => Ok(Platform::Ebay),
            other => Err(AclError::new(AclErrorKind::UnsupportedVariant)
                .with_op("platform_parse")
                .with_platform(other)
                .with_message(format!("Unknown platform tag: {}", other))),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Identity {
    /// Classify this identity by originating platform
    pub fn platform(&self) -> Platform {
        match self {
            Identity::Amazon(_) => Platform::Amazon,
            Identity::CDiscount(_) => Platform::CDiscount,
            Identity::Ebay(_) => Platform::Ebay,
        }
    }

    /// Serialize this identity's fields to a JSON object payload
    ///
    /// The payload is an order-insignificant field map; together with the
    /// platform tag it is sufficient to reconstruct the identity.
    pub fn payload(&self) -> Result<JsonValue> {
        let value = match self {
            Identity::Amazon(id) => serde_json::to_value(id),
            Identity::CDiscount(id) => serde_json::to_value(id),
            Identity::Ebay(id) => serde_json::to_value(id),
        };
        value.map_err(|e| {
            AclError::new(AclErrorKind::Serialization)
                .with_op("identity_payload")
                .with_platform(self.platform().as_str())
                .with_message(e.to_string())
        })
    }

    /// Reconstruct an identity from a platform tag and stored payload
    ///
    /// Dispatches on the tag to pick the variant constructor. Payloads that
    /// fail to deserialize indicate a corrupted row, not a caller error.
    pub fn from_parts(platform: Platform, payload: &JsonValue) -> Result<Self> {
        let rehydrate_err = |e: serde_json::Error| {
            AclError::new(AclErrorKind::Serialization)
                .with_op("identity_from_parts")
                .with_platform(platform.as_str())
                .with_message(format!("Payload does not match platform shape: {}", e))
        };

        match platform {
            Platform::Amazon => serde_json::from_value::<AmazonId>(payload.clone())
                .map(Identity::Amazon)
                .map_err(rehydrate_err),
            Platform::CDiscount => serde_json::from_value::<CDiscountId>(payload.clone())
                .map(Identity::CDiscount)
                .map_err(rehydrate_err),
            Platform::Ebay => serde_json::from_value::<EbayId>(payload.clone())
                .map(Identity::Ebay)
                .map_err(rehydrate_err),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Amazon(id) => write!(
                f,
                "Amazon(asin={}, sku={}, site={}, merchant_id={})",
                id.asin, id.sku, id.site, id.merchant_id
            ),
            Identity::CDiscount(id) => {
                write!(f, "CDiscount(sku={}, user_id={})", id.sku, id.user_id)
            }
            Identity::Ebay(id) => write!(f, "eBay(item_id={}, sku={})", id.item_id, id.sku),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amazon_fixture() -> Identity {
        Identity::Amazon(AmazonId {
            asin: "B001".to_string(),
            sku: "S1".to_string(),
            site: "US".to_string(),
            merchant_id: "M1".to_string(),
        })
    }

    #[test]
    fn test_classify_all_variants() {
        assert_eq!(amazon_fixture().platform(), Platform::Amazon);
        assert_eq!(
            Identity::CDiscount(CDiscountId {
                sku: "S1".to_string(),
                user_id: 999,
            })
            .platform(),
            Platform::CDiscount
        );
        assert_eq!(
            Identity::Ebay(EbayId {
                item_id: "E1".to_string(),
                sku: "S1".to_string(),
            })
            .platform(),
            Platform::Ebay
        );
    }

    #[test]
    fn test_platform_wire_names() {
        assert_eq!(Platform::Amazon.as_str(), "Amazon");
        assert_eq!(Platform::CDiscount.as_str(), "CDiscount");
        assert_eq!(Platform::Ebay.as_str(), "eBay");
    }

    #[test]
    fn test_platform_parse_round_trip() {
        for platform in [Platform::Amazon, Platform::CDiscount, Platform::Ebay] {
            assert_eq!(Platform::parse(platform.as_str()).unwrap(), platform);
        }
    }

    #[test]
    fn test_platform_parse_unknown_tag() {
        let err = Platform::parse("AliExpress").unwrap_err();
        assert_eq!(err.kind(), AclErrorKind::UnsupportedVariant);
        assert!(err.kind().is_fatal());
    }

    #[test]
    fn test_payload_round_trip() {
        let identity = amazon_fixture();
        let payload = identity.payload().unwrap();
        let rebuilt = Identity::from_parts(identity.platform(), &payload).unwrap();
        assert_eq!(rebuilt, identity);
    }

    #[test]
    fn test_payload_is_object() {
        let payload = amazon_fixture().payload().unwrap();
        let obj = payload.as_object().expect("payload should be a JSON object");
        assert_eq!(obj.len(), 4);
        assert_eq!(obj["asin"], "B001");
    }

    #[test]
    fn test_from_parts_shape_mismatch() {
        // An eBay payload rehydrated as Amazon is a corrupted row
        let payload = Identity::Ebay(EbayId {
            item_id: "E1".to_string(),
            sku: "S1".to_string(),
        })
        .payload()
        .unwrap();

        let err = Identity::from_parts(Platform::Amazon, &payload).unwrap_err();
        assert_eq!(err.kind(), AclErrorKind::Serialization);
    }

    #[test]
    fn test_structural_equality() {
        let a = amazon_fixture();
        let b = amazon_fixture();
        assert_eq!(a, b);

        let c = Identity::Amazon(AmazonId {
            asin: "B002".to_string(),
            sku: "S1".to_string(),
            site: "US".to_string(),
            merchant_id: "M1".to_string(),
        });
        assert_ne!(a, c);
    }
}
