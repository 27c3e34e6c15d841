// handlers/mod.rs - Two-tier handler layout
//
// Public (no session required) → Protected (session gate applied in app.rs)

pub mod protected; // Console pages and driver/user/withdrawal actions
pub mod public;    // Login, OTP verification, password reset, logout
