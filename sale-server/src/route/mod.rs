//! Route planning over selected sales.
//!
//! This module answers: "I've picked my sales for the morning, in what
//! order do I drive to them, and when do I get to each one?"
//!
//! Ordering uses a nearest-neighbour heuristic rather than an exact
//! tour solver; scheduling walks the ordered route once with a running
//! clock. Both are pure functions over their inputs.

mod config;
mod error;
mod itinerary;
mod optimize;
mod schedule;

pub use config::RouteConfig;
pub use error::RouteError;
pub use itinerary::{Itinerary, RouteStop, RouteWaypoint};
pub use optimize::optimize;
pub use schedule::{plan, schedule};
