use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Comment on a stock. `stock_id` must reference an existing stock at
/// creation time; the handler checks this before calling the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub stock_id: i32,
}
