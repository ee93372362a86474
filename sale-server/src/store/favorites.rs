//! Per-user favorite listings.

use std::collections::HashSet;

use tokio::sync::RwLock;

use crate::domain::{ListingId, UserId};

use super::error::StoreError;

/// Store of (user, listing) favorite pairs.
///
/// The platform owns durable favorites; this is the minimal surface
/// the toggle flow needs, so tests and the bundled in-memory store can
/// stand in for it.
#[allow(async_fn_in_trait)]
pub trait FavoriteStore {
    /// Whether `user` has favorited `listing`.
    async fn exists(&self, listing: &ListingId, user: &UserId) -> Result<bool, StoreError>;

    /// Record a favorite. Inserting an existing pair is a no-op.
    async fn insert(&self, listing: &ListingId, user: &UserId) -> Result<(), StoreError>;

    /// Remove a favorite. Removing an absent pair is a no-op.
    async fn remove(&self, listing: &ListingId, user: &UserId) -> Result<(), StoreError>;

    /// Flip the favorite state of a listing for a user.
    ///
    /// Returns the resulting state: `true` when the listing is now
    /// favorited, `false` when the toggle removed it. Implementations
    /// must flip in a single atomic step on the backing store; a
    /// check-then-write pair lets two racing toggles both observe
    /// "absent" and land on a state no serial order can produce.
    async fn toggle(&self, listing: &ListingId, user: &UserId) -> Result<bool, StoreError>;
}

/// In-process favorite store.
///
/// State lives for the lifetime of the server; a restart clears it.
#[derive(Debug, Default)]
pub struct InMemoryFavorites {
    pairs: RwLock<HashSet<(UserId, ListingId)>>,
}

impl InMemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// All listings `user` has favorited.
    pub async fn ids_for(&self, user: &UserId) -> HashSet<ListingId> {
        self.pairs
            .read()
            .await
            .iter()
            .filter(|(owner, _)| owner == user)
            .map(|(_, listing)| listing.clone())
            .collect()
    }
}

impl FavoriteStore for InMemoryFavorites {
    async fn exists(&self, listing: &ListingId, user: &UserId) -> Result<bool, StoreError> {
        let key = (user.clone(), listing.clone());
        Ok(self.pairs.read().await.contains(&key))
    }

    async fn insert(&self, listing: &ListingId, user: &UserId) -> Result<(), StoreError> {
        self.pairs
            .write()
            .await
            .insert((user.clone(), listing.clone()));
        Ok(())
    }

    async fn remove(&self, listing: &ListingId, user: &UserId) -> Result<(), StoreError> {
        self.pairs
            .write()
            .await
            .remove(&(user.clone(), listing.clone()));
        Ok(())
    }

    async fn toggle(&self, listing: &ListingId, user: &UserId) -> Result<bool, StoreError> {
        // One write guard spans the check and the flip.
        let mut pairs = self.pairs.write().await;
        let key = (user.clone(), listing.clone());
        if pairs.contains(&key) {
            pairs.remove(&key);
            Ok(false)
        } else {
            pairs.insert(key);
            Ok(true)
        }
    }
}
