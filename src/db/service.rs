// Database services for posts and comments
//
// Each method checks out one pooled connection and runs its statements on it

use super::queries;
use crate::error::AppError;
use crate::models::{Comment, Post};
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tracing::debug;

fn post_from_row(row: &Row) -> Result<Post, AppError> {
    Ok(Post {
        id: row.try_get("id")?,
        message: row.try_get("message")?,
        title: row.try_get("title")?,
        post_date: row.try_get("post_date")?,
    })
}

fn comment_from_row(row: &Row) -> Result<Comment, AppError> {
    Ok(Comment {
        comment_id: row.try_get("comment_id")?,
        post_id: row.try_get("post_id")?,
        comment: row.try_get("comment")?,
        time: row.try_get("time")?,
    })
}

// Post service for database operations
#[derive(Clone)]
pub struct PostService {
    pool: Pool,
}

impl PostService {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    // Newest posts first
    pub async fn list(&self, limit: i64) -> Result<Vec<Post>, AppError> {
        let client = self.pool.get().await?;
        let rows = client.query(queries::LIST_POSTS, &[&limit]).await?;
        rows.iter().map(post_from_row).collect()
    }

    // Zero or one row
    pub async fn find_by_id(&self, id: i32) -> Result<Vec<Post>, AppError> {
        let client = self.pool.get().await?;
        let rows = client.query(queries::GET_POST, &[&id]).await?;
        rows.iter().map(post_from_row).collect()
    }

    // Returns the new post's id
    pub async fn create(&self, message: &str, title: Option<&str>) -> Result<i32, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(queries::INSERT_POST, &[&message, &title])
            .await?;
        Ok(row.try_get("id")?)
    }

    // Returns the number of rows updated; callers decide what zero means
    pub async fn update(&self, id: i32, message: &str, title: Option<&str>) -> Result<u64, AppError> {
        let client = self.pool.get().await?;
        let affected = client
            .execute(queries::UPDATE_POST, &[&message, &title, &id])
            .await?;
        Ok(affected)
    }

    // Delete a post together with its comments.
    //
    // Both statements share one transaction, which is committed only when
    // exactly one post row went away. Returns whether the post existed.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;

        let comments = tx.execute(queries::DELETE_COMMENTS_FOR_POST, &[&id]).await?;
        let posts = tx.execute(queries::DELETE_POST, &[&id]).await?;

        if posts == 1 {
            tx.commit().await?;
            debug!("Deleted post {} and {} comments", id, comments);
            Ok(true)
        } else {
            tx.rollback().await?;
            Ok(false)
        }
    }
}

// Comment service for database operations
#[derive(Clone)]
pub struct CommentService {
    pool: Pool,
}

impl CommentService {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    // Newest comments first
    pub async fn list_for_post(&self, post_id: i32) -> Result<Vec<Comment>, AppError> {
        let client = self.pool.get().await?;
        let rows = client.query(queries::LIST_COMMENTS, &[&post_id]).await?;
        rows.iter().map(comment_from_row).collect()
    }

    // The post's existence is left to the foreign key
    pub async fn create(&self, post_id: i32, comment: &str) -> Result<i32, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(queries::INSERT_COMMENT, &[&post_id, &comment])
            .await?;
        Ok(row.try_get("comment_id")?)
    }

    pub async fn update(&self, post_id: i32, comment_id: i32, comment: &str) -> Result<u64, AppError> {
        let client = self.pool.get().await?;
        let affected = client
            .execute(queries::UPDATE_COMMENT, &[&comment, &comment_id, &post_id])
            .await?;
        Ok(affected)
    }

    pub async fn delete(&self, post_id: i32, comment_id: i32) -> Result<u64, AppError> {
        let client = self.pool.get().await?;
        let affected = client
            .execute(queries::DELETE_COMMENT, &[&comment_id, &post_id])
            .await?;
        Ok(affected)
    }
}
