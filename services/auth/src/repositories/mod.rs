//! Authentication service repositories

pub mod admin;
pub mod session;

pub use admin::AdminRepository;
pub use session::{SessionRepository, SessionSettings};
