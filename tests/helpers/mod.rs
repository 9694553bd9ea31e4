// Shared helpers for contract and integration tests.
//
// Tests drive the real routes through actix_web::test against the in-memory
// repository; no network listener is bound.
#![allow(dead_code)]


pub use test_app::*;
pub use test_data::*;
