//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains all request/response structures used by the API.

pub mod comment;
pub mod post;

// Re-export commonly used types
pub use comment::*;
pub use post::*;

use serde::Serialize;

/// Row-set envelope: `{"data": [...]}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: Vec<T>,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Status envelope: `{"status": "..."}`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }

    pub fn success() -> Self {
        Self::new("success")
    }
}
