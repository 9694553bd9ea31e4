mod discount;

pub use discount::{DiscountKind, DiscountPolicy, DiscountSpec};
