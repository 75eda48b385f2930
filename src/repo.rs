//! Repository facade over the graph store
//!
//! `GraphRepository` is the handle external glue holds: it owns the
//! store behind a reader-writer lock, validates input at the boundary,
//! logs every mutation, and keeps the not-found cases as plain `false`
//! outcomes instead of errors. Components share the same store by
//! cloning the repository handle; there is no process-wide singleton.

use crate::algo::{
    self, CollaborativeParams, CollaborativeRecommendation, FriendParams, FriendRecommendation,
    Subgraph, UserStats, MAX_DEPTH, MIN_DEPTH,
};
use crate::graph::{GraphError, GraphStore, RatingType, MAX_RATING, MIN_RATING};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by repository operations
#[derive(Error, Debug)]
pub enum RepoError {
    /// Bad input or a store-side constraint fault
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The backing store cannot be queried right now. Distinct from an
    /// empty result; callers may retry with backoff.
    #[error("graph store unavailable: {0}")]
    Unavailable(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Shared handle to the recommendation graph.
///
/// Reads run concurrently; writes are serialized by the lock and each
/// one holds it only for a single upsert or cascade, which is what
/// makes the get-or-create operations atomic: two simultaneous
/// `add_user` calls for the same name cannot both pass the exists
/// check.
#[derive(Debug, Clone, Default)]
pub struct GraphRepository {
    store: Arc<RwLock<GraphStore>>,
}

impl GraphRepository {
    /// Create a repository over an empty store
    pub fn new() -> Self {
        GraphRepository {
            store: Arc::new(RwLock::new(GraphStore::new())),
        }
    }

    /// Create a repository over an existing store
    pub fn with_store(store: GraphStore) -> Self {
        GraphRepository {
            store: Arc::new(RwLock::new(store)),
        }
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, GraphStore>> {
        self.store
            .read()
            .map_err(|e| RepoError::Unavailable(e.to_string()))
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, GraphStore>> {
        self.store
            .write()
            .map_err(|e| RepoError::Unavailable(e.to_string()))
    }

    /// Idempotently ensure a user exists. Returns whether a node was
    /// created; an already-present name is a success, not an error.
    pub fn add_user(&self, name: &str) -> RepoResult<bool> {
        let (_, created) = self.write()?.upsert_user(name)?;
        if created {
            info!("Added user: {}", name.trim());
        } else {
            debug!("User already exists: {}", name.trim());
        }
        Ok(created)
    }

    /// Idempotently ensure a product exists, with an optional category
    /// applied on creation.
    pub fn add_product(&self, name: &str, category: Option<&str>) -> RepoResult<bool> {
        let (_, created) = self.write()?.upsert_product(name, category)?;
        if created {
            info!("Added product: {}", name.trim());
        } else {
            debug!("Product already exists: {}", name.trim());
        }
        Ok(created)
    }

    /// Delete a user and every edge incident to it. Returns whether a
    /// user existed to delete.
    pub fn delete_user(&self, name: &str) -> RepoResult<bool> {
        let mut store = self.write()?;
        match store.user_id(name) {
            Some(id) => {
                store.delete_node(id)?;
                info!("Deleted user: {}", name.trim());
                Ok(true)
            }
            None => {
                debug!("No user to delete: {}", name.trim());
                Ok(false)
            }
        }
    }

    /// Delete a product and every rating referencing it. Returns
    /// whether a product existed to delete.
    pub fn delete_product(&self, name: &str) -> RepoResult<bool> {
        let mut store = self.write()?;
        match store.product_id(name) {
            Some(id) => {
                store.delete_node(id)?;
                info!("Deleted product: {}", name.trim());
                Ok(true)
            }
            None => {
                debug!("No product to delete: {}", name.trim());
                Ok(false)
            }
        }
    }

    /// Make `follower` follow `followee`. Following the same user
    /// twice is a no-op; following yourself is a validation error;
    /// missing endpoints are reported as `false`, never auto-created.
    pub fn create_follow(&self, follower: &str, followee: &str) -> RepoResult<bool> {
        if follower.trim() == followee.trim() {
            return Err(GraphError::SelfFollow.into());
        }

        let mut store = self.write()?;
        let (Some(from), Some(to)) = (store.user_id(follower), store.user_id(followee)) else {
            warn!(
                "Cannot create follow, missing user: {} -> {}",
                follower.trim(),
                followee.trim()
            );
            return Ok(false);
        };

        let (_, created) = store.upsert_follow(from, to)?;
        if created {
            info!("{} now follows {}", follower.trim(), followee.trim());
        } else {
            debug!("{} already follows {}", follower.trim(), followee.trim());
        }
        Ok(true)
    }

    /// Record a rating of a product by a user, overwriting any
    /// previous rating by the same user. Missing endpoints are
    /// reported as `false`.
    pub fn rate_product(
        &self,
        user: &str,
        product: &str,
        rating: u8,
        rating_type: RatingType,
    ) -> RepoResult<bool> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(GraphError::RatingOutOfRange(rating).into());
        }

        let mut store = self.write()?;
        let (Some(user_id), Some(product_id)) = (store.user_id(user), store.product_id(product))
        else {
            warn!(
                "Cannot rate, missing endpoint: {} -> {}",
                user.trim(),
                product.trim()
            );
            return Ok(false);
        };

        let (_, created) = store.upsert_rating(user_id, product_id, rating, rating_type)?;
        if created {
            info!(
                "{} rated {}: {}/5 ({})",
                user.trim(),
                product.trim(),
                rating,
                rating_type
            );
        } else {
            info!(
                "{} re-rated {}: {}/5 ({})",
                user.trim(),
                product.trim(),
                rating,
                rating_type
            );
        }
        Ok(true)
    }

    /// All user names, ascending
    pub fn list_users(&self) -> RepoResult<Vec<String>> {
        Ok(self.read()?.user_names())
    }

    /// All product names, ascending
    pub fn list_products(&self) -> RepoResult<Vec<String>> {
        Ok(self.read()?.product_names())
    }

    /// Distinct-neighbor counts for a user; all zeroes when the user
    /// does not exist.
    pub fn user_stats(&self, name: &str) -> RepoResult<UserStats> {
        let store = self.read()?;
        Ok(store
            .user_id(name)
            .map(|id| algo::user_stats(&store, id))
            .unwrap_or_default())
    }

    /// Products recommended by users this user follows.
    pub fn recommend_by_friends(
        &self,
        user: &str,
        params: &FriendParams,
    ) -> RepoResult<Vec<FriendRecommendation>> {
        let store = self.read()?;
        match store.user_id(user) {
            Some(id) => Ok(algo::recommend_by_friends(&store, id, params)),
            None => {
                debug!("No such user for friend recommendations: {}", user.trim());
                Ok(Vec::new())
            }
        }
    }

    /// Products recommended by users with similar rating patterns.
    pub fn recommend_collaborative(
        &self,
        user: &str,
        params: &CollaborativeParams,
    ) -> RepoResult<Vec<CollaborativeRecommendation>> {
        let store = self.read()?;
        match store.user_id(user) {
            Some(id) => Ok(algo::recommend_collaborative(&store, id, params)),
            None => {
                debug!(
                    "No such user for collaborative recommendations: {}",
                    user.trim()
                );
                Ok(Vec::new())
            }
        }
    }

    /// Deduplicated node/edge neighborhood around a user, for
    /// rendering. Depth must be within `MIN_DEPTH..=MAX_DEPTH`; a
    /// missing user yields an empty subgraph.
    pub fn neighborhood(&self, user: &str, depth: usize) -> RepoResult<Subgraph> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            return Err(GraphError::DepthOutOfRange(depth).into());
        }
        let store = self.read()?;
        match store.user_id(user) {
            Some(id) => Ok(algo::neighborhood(&store, id, depth)?),
            None => {
                debug!("No such user for neighborhood: {}", user.trim());
                Ok(Subgraph::default())
            }
        }
    }

    /// Idempotently verify the uniqueness invariants of the backing
    /// store. For the in-memory store this audits the name and pair
    /// indexes; a persisted implementation would create its indexes
    /// here.
    pub fn constraints_ready(&self) -> RepoResult<()> {
        self.read()?.check_constraints()?;
        Ok(())
    }
}
