//! Web layer for the garage-sale planner.
//!
//! Provides HTTP endpoints for filtering listings, planning routes,
//! and toggling favorites.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
