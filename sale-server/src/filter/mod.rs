//! Listing discovery filters.
//!
//! This module turns a shopper's criteria into per-criterion predicates,
//! applies them as a single conjunction, and orders the survivors for
//! display. Criteria that are unset contribute nothing; criteria that
//! are set must all hold at once.

mod criteria;
mod engine;
mod predicate;

pub use criteria::{FilterCriteria, InvalidFilter};
pub use engine::filter_listings;
pub use predicate::{Predicate, compile, matches_all};
