//! Post models

use crate::error::{validation_error, AppError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

pub const WRONG_POST_INPUT: &str = "wrong input type";
pub const NO_SUCH_POST: &str = "no post with that id";

/// A row of the `posts` table
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: i32,
    pub message: String,
    pub title: Option<String>,
    pub post_date: DateTime<Utc>,
}

/// Body of `POST /posts` and `PUT /posts/:id`
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct PostInput {
    #[validate(length(min = 1))]
    pub message: String,
    pub title: Option<String>,
}

impl PostInput {
    /// Extract from a raw JSON body.
    ///
    /// `message` must be a non-empty string. `title` may be absent, but when
    /// present it must be a string (`null` included in the rejection).
    pub fn from_json(body: Option<&Value>) -> Result<Self, AppError> {
        let obj = body
            .and_then(Value::as_object)
            .ok_or_else(|| validation_error(WRONG_POST_INPUT))?;

        let message = obj
            .get("message")
            .and_then(Value::as_str)
            .ok_or_else(|| validation_error(WRONG_POST_INPUT))?;

        let title = match obj.get("title") {
            None => None,
            Some(Value::String(t)) => Some(t.clone()),
            Some(_) => return Err(validation_error(WRONG_POST_INPUT)),
        };

        let input = Self {
            message: message.to_string(),
            title,
        };
        input
            .validate()
            .map_err(|_| validation_error(WRONG_POST_INPUT))?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rejected(body: Value) -> bool {
        matches!(
            PostInput::from_json(Some(&body)),
            Err(AppError::Validation(ref m)) if m == WRONG_POST_INPUT
        )
    }

    #[test]
    fn test_message_only() {
        let input = PostInput::from_json(Some(&json!({"message": "hello"}))).unwrap();
        assert_eq!(
            input,
            PostInput {
                message: "hello".to_string(),
                title: None
            }
        );
    }

    #[test]
    fn test_message_and_title() {
        let input =
            PostInput::from_json(Some(&json!({"message": "hello", "title": "greeting"}))).unwrap();
        assert_eq!(input.title.as_deref(), Some("greeting"));
    }

    #[test]
    fn test_empty_title_is_allowed() {
        let input = PostInput::from_json(Some(&json!({"message": "hello", "title": ""}))).unwrap();
        assert_eq!(input.title.as_deref(), Some(""));
    }

    #[test]
    fn test_rejects_malformed_bodies() {
        assert!(rejected(json!({})));
        assert!(rejected(json!({"message": ""})));
        assert!(rejected(json!({"message": 42})));
        assert!(rejected(json!({"message": null})));
        assert!(rejected(json!({"message": "hello", "title": 7})));
        assert!(rejected(json!({"message": "hello", "title": null})));
        assert!(rejected(json!(["message", "hello"])));
        assert!(rejected(json!("hello")));
    }

    #[test]
    fn test_rejects_missing_body() {
        assert!(PostInput::from_json(None).is_err());
    }

    #[test]
    fn test_post_serializes_null_title() {
        let post = Post {
            id: 1,
            message: "hello".to_string(),
            title: None,
            post_date: DateTime::from_timestamp(0, 0).unwrap(),
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["message"], json!("hello"));
        assert_eq!(value["title"], Value::Null);
        assert!(value["post_date"].is_string());
    }
}
