//! Domain types for the garage-sale planner.
//!
//! This module contains the core domain model types that represent
//! validated sale-listing data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod coordinate;
mod error;
mod listing;
mod time;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM};
pub use error::DomainError;
pub use listing::{Listing, ListingId, ListingStatus, SaleHours, UserId};
pub use time::{ClockTime, TimeError};
