//! Comment models

use crate::error::{validation_error, AppError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

pub const WRONG_COMMENT_INPUT: &str = "comment is of wrong type";
pub const NO_SUCH_COMMENT: &str = "no comment with that id";

/// A row of the `comments` table
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub comment_id: i32,
    pub post_id: i32,
    pub comment: String,
    pub time: DateTime<Utc>,
}

/// Body of `POST /posts/:id/comments` and `PUT /posts/:id/comments/:comment_id`
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CommentInput {
    #[validate(length(min = 1))]
    pub comment: String,
}

impl CommentInput {
    pub fn from_json(body: Option<&Value>) -> Result<Self, AppError> {
        let comment = body
            .and_then(|b| b.get("comment"))
            .and_then(Value::as_str)
            .ok_or_else(|| validation_error(WRONG_COMMENT_INPUT))?;

        let input = Self {
            comment: comment.to_string(),
        };
        input
            .validate()
            .map_err(|_| validation_error(WRONG_COMMENT_INPUT))?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_accepts_string_comment() {
        let input = CommentInput::from_json(Some(&json!({"comment": "nice"}))).unwrap();
        assert_eq!(input.comment, "nice");
    }

    #[test]
    fn test_rejects_wrong_types() {
        for body in [
            json!({}),
            json!({"comment": 1}),
            json!({"comment": ["nice"]}),
            json!({"comment": null}),
            json!({"comment": ""}),
            json!("nice"),
        ] {
            let err = CommentInput::from_json(Some(&body)).unwrap_err();
            assert!(matches!(err, AppError::Validation(ref m) if m == WRONG_COMMENT_INPUT));
        }
    }
}
