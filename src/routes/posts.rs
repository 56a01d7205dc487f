//! Post route handlers

use super::parse_id;
use crate::error::{not_found_error, ApiResult};
use crate::models::{DataResponse, Post, PostInput, StatusResponse, NO_SUCH_POST};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// List the newest posts
pub async fn list_posts(
    State(state): State<SharedState>,
) -> ApiResult<Json<DataResponse<Post>>> {
    debug!("Listing posts (limit {})", state.posts_limit);

    let posts = state.posts.list(state.posts_limit).await?;

    Ok(Json(DataResponse::new(posts)))
}

/// Get a single post
pub async fn get_post(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Post>>> {
    let id = parse_id(&id)?;
    debug!("Getting post {}", id);

    let posts = state.posts.find_by_id(id).await?;
    if posts.is_empty() {
        warn!("Post {} not found", id);
        return Err(not_found_error(NO_SUCH_POST));
    }

    Ok(Json(DataResponse::new(posts)))
}

/// Create a new post
pub async fn create_post(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let body = body.ok().map(|Json(value)| value);
    let input = PostInput::from_json(body.as_ref())?;

    let id = state
        .posts
        .create(&input.message, input.title.as_deref())
        .await?;

    info!("Post {} created", id);
    Ok(Json(StatusResponse::success()))
}

/// Replace a post's message and title.
///
/// An id with no matching row still reports success.
pub async fn update_post(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let id = parse_id(&id)?;
    let body = body.ok().map(|Json(value)| value);
    let input = PostInput::from_json(body.as_ref())?;

    let affected = state
        .posts
        .update(id, &input.message, input.title.as_deref())
        .await?;

    info!("Post {} updated ({} rows)", id, affected);
    Ok(Json(StatusResponse::success()))
}

/// Delete a post and all of its comments
pub async fn delete_post(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StatusResponse>> {
    let id = parse_id(&id)?;
    debug!("Deleting post {}", id);

    if !state.posts.delete(id).await? {
        warn!("Post {} not found", id);
        return Err(not_found_error(NO_SUCH_POST));
    }

    info!("Post {} deleted", id);
    Ok(Json(StatusResponse::success()))
}
