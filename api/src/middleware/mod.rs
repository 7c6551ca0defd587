pub mod cors;
pub mod session_gate;

pub use cors::create_cors;
pub use session_gate::{CurrentUser, SessionContext, SessionGate};
