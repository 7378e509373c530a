//! Property tests for identity canonicalization and digesting
//!
//! Digest determinism and discrimination are load-bearing: the store
//! answers structural equality questions with byte comparisons over the
//! digest column, so a digest that varies across calls or fails to
//! separate distinct identities silently corrupts resolution.

use chanid_core::canonical;
use chanid_core::{AmazonId, CDiscountId, EbayId, Identity};
use proptest::prelude::*;

fn field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,12}"
}

proptest! {
    #[test]
    fn digest_is_stable_across_calls(
        asin in field(),
        sku in field(),
        site in field(),
        merchant_id in field(),
    ) {
        let identity = Identity::Amazon(AmazonId { asin, sku, site, merchant_id });
        let d1 = canonical::digest(&identity).unwrap();
        let d2 = canonical::digest(&identity).unwrap();
        prop_assert_eq!(d1, d2);
    }

    #[test]
    fn structurally_equal_identities_share_digest(
        item_id in field(),
        sku in field(),
    ) {
        let a = Identity::Ebay(EbayId { item_id: item_id.clone(), sku: sku.clone() });
        let b = Identity::Ebay(EbayId { item_id, sku });
        prop_assert_eq!(canonical::digest(&a).unwrap(), canonical::digest(&b).unwrap());
    }

    #[test]
    fn distinct_identities_get_distinct_digests(
        sku in field(),
        user_a in 1000i64..100_000,
        user_b in 1000i64..100_000,
    ) {
        prop_assume!(user_a != user_b);
        let a = Identity::CDiscount(CDiscountId { sku: sku.clone(), user_id: user_a });
        let b = Identity::CDiscount(CDiscountId { sku, user_id: user_b });
        prop_assert_ne!(canonical::digest(&a).unwrap(), canonical::digest(&b).unwrap());
    }

    #[test]
    fn canonical_bytes_round_trip_through_payload(
        asin in field(),
        sku in field(),
        site in field(),
        merchant_id in field(),
    ) {
        let identity = Identity::Amazon(AmazonId { asin, sku, site, merchant_id });
        let payload = identity.payload().unwrap();
        let rebuilt = Identity::from_parts(identity.platform(), &payload).unwrap();
        prop_assert_eq!(
            canonical::canonicalize(&identity).unwrap(),
            canonical::canonicalize(&rebuilt).unwrap()
        );
    }
}
