//! SQL query constants
//!
//! Contains all SQL statements used by the application. Every value is bound
//! through a positional placeholder.
//!
//! Timestamp columns may be `timestamp` or `timestamptz`; reads cast to
//! `timestamptz` so rows always decode as `DateTime<Utc>`.

pub const CREATE_POSTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        id SERIAL PRIMARY KEY,
        message TEXT NOT NULL,
        title TEXT,
        post_date TIMESTAMP NOT NULL DEFAULT now()
    )
"#;

pub const CREATE_COMMENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS comments (
        comment_id SERIAL PRIMARY KEY,
        post_id INTEGER NOT NULL REFERENCES posts(id),
        comment TEXT NOT NULL,
        time TIMESTAMP NOT NULL DEFAULT now()
    )
"#;

pub const CREATE_COMMENTS_POST_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id)";

/// Newest posts first, capped at `$1` rows
pub const LIST_POSTS: &str = r#"
    SELECT id, message, title, post_date::timestamptz AS post_date
    FROM posts
    ORDER BY post_date DESC
    LIMIT $1
"#;

pub const GET_POST: &str =
    "SELECT id, message, title, post_date::timestamptz AS post_date FROM posts WHERE id = $1";

pub const INSERT_POST: &str = "INSERT INTO posts (message, title) VALUES ($1, $2) RETURNING id";

pub const UPDATE_POST: &str = "UPDATE posts SET message = $1, title = $2 WHERE id = $3";

pub const DELETE_POST: &str = "DELETE FROM posts WHERE id = $1";

pub const DELETE_COMMENTS_FOR_POST: &str = "DELETE FROM comments WHERE post_id = $1";

pub const LIST_COMMENTS: &str = r#"
    SELECT comment_id, post_id, comment, time::timestamptz AS time
    FROM comments
    WHERE post_id = $1
    ORDER BY time DESC, comment_id DESC
"#;

pub const INSERT_COMMENT: &str =
    "INSERT INTO comments (post_id, comment) VALUES ($1, $2) RETURNING comment_id";

pub const UPDATE_COMMENT: &str =
    "UPDATE comments SET comment = $1 WHERE comment_id = $2 AND post_id = $3";

pub const DELETE_COMMENT: &str = "DELETE FROM comments WHERE comment_id = $1 AND post_id = $2";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use tokio_postgres::types::{FromSql, Type};

    #[test]
    fn test_row_timestamps_decode_only_from_timestamptz() {
        assert!(<DateTime<Utc> as FromSql>::accepts(&Type::TIMESTAMPTZ));
        assert!(!<DateTime<Utc> as FromSql>::accepts(&Type::TIMESTAMP));
    }

    #[test]
    fn test_reads_cast_timestamps() {
        assert!(LIST_POSTS.contains("post_date::timestamptz AS post_date"));
        assert!(GET_POST.contains("post_date::timestamptz AS post_date"));
        assert!(LIST_COMMENTS.contains("time::timestamptz AS time"));
    }
}
