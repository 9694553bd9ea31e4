pub mod models;
pub mod services;

pub use models::{DiscountKind, DiscountPolicy, DiscountSpec};
pub use services::DiscountApplier;
