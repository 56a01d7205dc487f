//! Comment route handlers
//!
//! Comments live under their post: `/posts/{id}/comments`.

use super::parse_id;
use crate::error::{not_found_error, ApiResult};
use crate::models::{Comment, CommentInput, DataResponse, StatusResponse, NO_SUCH_COMMENT};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// List a post's comments, newest first
pub async fn list_comments(
    State(state): State<SharedState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<DataResponse<Comment>>> {
    let post_id = parse_id(&post_id)?;
    debug!("Listing comments for post {}", post_id);

    let comments = state.comments.list_for_post(post_id).await?;

    Ok(Json(DataResponse::new(comments)))
}

/// Add a comment to a post
pub async fn create_comment(
    State(state): State<SharedState>,
    Path(post_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let post_id = parse_id(&post_id)?;
    let body = body.ok().map(|Json(value)| value);
    let input = CommentInput::from_json(body.as_ref())?;

    let comment_id = state.comments.create(post_id, &input.comment).await?;

    info!("Comment {} added to post {}", comment_id, post_id);
    Ok(Json(StatusResponse::success()))
}

/// Edit a comment
pub async fn update_comment(
    State(state): State<SharedState>,
    Path((post_id, comment_id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let post_id = parse_id(&post_id)?;
    let comment_id = parse_id(&comment_id)?;
    let body = body.ok().map(|Json(value)| value);
    let input = CommentInput::from_json(body.as_ref())?;

    let affected = state
        .comments
        .update(post_id, comment_id, &input.comment)
        .await?;
    if affected != 1 {
        warn!("Comment {} on post {} not found", comment_id, post_id);
        return Err(not_found_error(NO_SUCH_COMMENT));
    }

    info!("Comment {} updated", comment_id);
    Ok(Json(StatusResponse::success()))
}

/// Delete a comment
pub async fn delete_comment(
    State(state): State<SharedState>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> ApiResult<Json<StatusResponse>> {
    let post_id = parse_id(&post_id)?;
    let comment_id = parse_id(&comment_id)?;
    debug!("Deleting comment {} on post {}", comment_id, post_id);

    let affected = state.comments.delete(post_id, comment_id).await?;
    if affected != 1 {
        warn!("Comment {} on post {} not found", comment_id, post_id);
        return Err(not_found_error(NO_SUCH_COMMENT));
    }

    info!("Comment {} deleted", comment_id);
    Ok(Json(StatusResponse::success()))
}
