//! Listing data access.
//!
//! The hosting platform's listings API is the source of truth. This
//! module fetches from it, caches responses briefly, and degrades to
//! the last successful response or to seed data when the API is
//! unreachable, labelling every batch with its provenance. Favorites
//! are held in process memory behind a small trait.

mod client;
mod error;
mod favorites;
mod seed;
mod source;

pub use client::{ListingRecord, ListingStoreClient, ListingsPage, StoreConfig, StoreQuery};
pub use error::StoreError;
pub use favorites::{FavoriteStore, InMemoryFavorites};
pub use seed::{built_in_listings, load_seed};
pub use source::{CachedListingSource, Freshness, ListingBatch, SourceConfig};
