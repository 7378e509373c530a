pub mod identity;
pub mod mapping;

pub use identity::{AmazonId, CDiscountId, EbayId, Identity, Platform};
pub use mapping::Mapping;
