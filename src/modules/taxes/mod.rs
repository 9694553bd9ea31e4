pub mod models;
pub mod services;

pub use models::TaxSpec;
pub use services::TaxCalculator;
