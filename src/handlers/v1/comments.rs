use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::dto::{CommentDto, CreateCommentRequest, UpdateCommentRequest};
use crate::error::ApiError;
use crate::mappers::{comment_to_dto, create_request_to_comment};
use crate::state::AppState;

/// GET /api/v1/comments
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CommentDto>>, ApiError> {
    let comments = state.comments.list().await?;
    Ok(Json(comments.iter().map(comment_to_dto).collect()))
}

/// GET /api/v1/comments/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CommentDto>, ApiError> {
    let comment = state
        .comments
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;
    Ok(Json(comment_to_dto(&comment)))
}

/// POST /api/v1/comments/:stock_id
///
/// The referenced stock must exist; that check belongs here, not in the
/// comment store.
pub async fn create(
    State(state): State<AppState>,
    Path(stock_id): Path<i32>,
    Json(dto): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    dto.validate()
        .map_err(|errors| ApiError::validation_error("Invalid comment payload", errors))?;

    if !state.stocks.exists(stock_id).await? {
        return Err(ApiError::bad_request("Stock does not exist"));
    }

    let created = state
        .comments
        .create(create_request_to_comment(&dto, stock_id))
        .await?;
    Ok((StatusCode::CREATED, Json(comment_to_dto(&created))))
}

/// PUT /api/v1/comments/:id - replaces title and content.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateCommentRequest>,
) -> Result<Json<CommentDto>, ApiError> {
    dto.validate()
        .map_err(|errors| ApiError::validation_error("Invalid comment payload", errors))?;

    let updated = state
        .comments
        .update(id, &dto)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;
    Ok(Json(comment_to_dto(&updated)))
}

/// DELETE /api/v1/comments/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .comments
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;
    Ok(StatusCode::NO_CONTENT)
}
