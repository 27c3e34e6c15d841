pub mod gate;
pub mod session;

pub use gate::{authenticate, AuthenticatedAdmin, GateDecision, LoginStage};
pub use session::{AdminSession, SessionTokens, SESSION_ADMIN_KEY};
