//! Authentication service: admin accounts and the bearer-token sessions the
//! API service validates against.

pub mod error;
pub mod models;
pub mod rate_limiter;
pub mod repositories;
pub mod routes;
pub mod sweeper;
pub mod validation;

use crate::{
    rate_limiter::RateLimiter,
    repositories::{AdminRepository, SessionRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub admin_repository: AdminRepository,
    pub session_repository: SessionRepository,
    pub rate_limiter: RateLimiter,
}
