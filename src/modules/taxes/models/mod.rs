mod tax;

pub use tax::TaxSpec;
