//! Authentication service models

pub mod admin;
pub mod session;

// Re-export for convenience
pub use admin::{Admin, NewAdmin};
pub use session::{AdminIdentity, Session};
