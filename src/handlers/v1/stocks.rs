use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::dto::{CreateStockRequest, StockDto, UpdateStockRequest};
use crate::error::ApiError;
use crate::mappers::{create_request_to_stock, stock_to_dto, stock_with_comments_to_dto};
use crate::middleware::AuthUser;
use crate::models::Role;
use crate::query::StockQuery;
use crate::state::AppState;

/// GET /api/v1/stocks - filtered, sorted, paginated listing.
///
/// Runs behind the JWT middleware; both seeded roles may read.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(mut query): Query<StockQuery>,
) -> Result<Json<Vec<StockDto>>, ApiError> {
    if !user.has_any_role(&[Role::Admin, Role::User]) {
        return Err(ApiError::forbidden("Insufficient role"));
    }

    query.clamp_page_size(state.max_page_size);
    let records = state.stocks.list(&query).await?;
    Ok(Json(records.iter().map(stock_with_comments_to_dto).collect()))
}

/// GET /api/v1/stocks/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StockDto>, ApiError> {
    let record = state
        .stocks
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock not found"))?;
    Ok(Json(stock_with_comments_to_dto(&record)))
}

/// POST /api/v1/stocks
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<CreateStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    dto.validate()
        .map_err(|errors| ApiError::validation_error("Invalid stock payload", errors))?;

    let created = state.stocks.create(create_request_to_stock(&dto)).await?;
    Ok((StatusCode::CREATED, Json(stock_to_dto(&created, &[]))))
}

/// PUT /api/v1/stocks/:id - full field replace; 404 when the id is absent.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateStockRequest>,
) -> Result<Json<StockDto>, ApiError> {
    dto.validate()
        .map_err(|errors| ApiError::validation_error("Invalid stock payload", errors))?;

    let updated = state
        .stocks
        .update(id, &dto)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock not found"))?;
    Ok(Json(stock_to_dto(&updated, &[])))
}

/// DELETE /api/v1/stocks/:id
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
