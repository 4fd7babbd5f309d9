//! Version 2 stock endpoints: same CRUD semantics as v1, responses
//! wrapped as `{ message, data }`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::VERSION_MESSAGE;
use crate::dto::{CreateStockRequest, UpdateStockRequest};
use crate::error::ApiError;
use crate::mappers::{create_request_to_stock, stock_to_dto, stock_with_comments_to_dto};
use crate::query::StockQuery;
use crate::state::AppState;

/// GET /api/v2/stock
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let query = StockQuery {
        page_size: state.max_page_size,
        ..Default::default()
    };
    let records = state.stocks.list(&query).await?;
    let data: Vec<_> = records.iter().map(stock_with_comments_to_dto).collect();

    Ok(Json(json!({ "message": VERSION_MESSAGE, "data": data })))
}

/// GET /api/v2/stock/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .stocks
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock not found"))?;

    Ok(Json(json!({
        "message": VERSION_MESSAGE,
        "data": stock_with_comments_to_dto(&record),
    })))
}

/// POST /api/v2/stock
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<CreateStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    dto.validate()
        .map_err(|errors| ApiError::validation_error("Invalid stock payload", errors))?;

    let created = state.stocks.create(create_request_to_stock(&dto)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": VERSION_MESSAGE,
            "data": stock_to_dto(&created, &[]),
        })),
    ))
}

/// PUT /api/v2/stock/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    dto.validate()
        .map_err(|errors| ApiError::validation_error("Invalid stock payload", errors))?;

    let updated = state
        .stocks
        .update(id, &dto)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock not found"))?;

    Ok(Json(json!({
        "message": VERSION_MESSAGE,
        "data": stock_to_dto(&updated, &[]),
    })))
}

/// DELETE /api/v2/stock/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .stocks
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock not found"))?;
    Ok(StatusCode::NO_CONTENT)
}
