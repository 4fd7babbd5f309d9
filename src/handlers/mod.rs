pub mod v1;
pub mod v2;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Stocks API",
            "version": version,
            "description": "REST API for tracking stocks and user comments",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "accounts": "/api/v1/accounts/register, /api/v1/accounts/login (public - token acquisition)",
                "stocks_v1": "/api/v1/stocks[/:id] (list requires a token)",
                "comments_v1": "/api/v1/comments[/:id], POST /api/v1/comments/:stock_id",
                "stocks_v2": "/api/v2/stock[/:id]",
            }
        }
    }))
}

/// GET /health - liveness plus database connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let database = match &state.pool {
        Some(pool) => crate::database::health_check(pool)
            .await
            .map_err(|e| e.to_string()),
        None => Ok(()),
    };

    match database {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": { "status": "degraded", "timestamp": now, "database_error": e }
            })),
        ),
    }
}
