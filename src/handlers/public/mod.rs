// handlers/public/mod.rs - Public handlers (no session required)
//
// The OTP login flow and the entry redirects. Everything here must work for
// an anonymous browser; handlers validate their own form input.

pub mod auth;

pub use auth::*;
