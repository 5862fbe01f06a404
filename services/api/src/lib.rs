//! Public API service: booking intake, the availability calendar, admin
//! booking management and site content.

pub mod day_key;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
