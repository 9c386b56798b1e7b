//! Web layer for the fare server.
//!
//! Provides JSON endpoints for section search, stage fares, highway fares
//! and the route finder.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
