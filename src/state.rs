//! Application state management
//!
//! Contains shared state accessible across all handlers. No entity is held
//! here; the database is the only source of truth.

use crate::db::{CommentService, PostService};
use deadpool_postgres::Pool;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Post queries
    pub posts: PostService,

    /// Comment queries
    pub comments: CommentService,

    /// Row limit for the post listing
    pub posts_limit: i64,
}

impl AppState {
    pub fn new(pool: Pool, posts_limit: i64) -> Self {
        Self {
            posts: PostService::new(pool.clone()),
            comments: CommentService::new(pool),
            posts_limit,
        }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
