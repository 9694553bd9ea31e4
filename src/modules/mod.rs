pub mod discounts;
pub mod health;
pub mod invoices;
pub mod taxes;
