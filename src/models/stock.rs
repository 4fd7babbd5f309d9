use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::comment::Comment;

/// Persisted stock record. Ids are assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Stock {
    pub id: i32,
    pub symbol: String,
    pub company_name: String,
    pub purchase: Decimal,
    pub last_div: Decimal,
    pub industry: String,
    pub market_cap: i64,
}

/// A stock together with its comments, as returned by reads that
/// eagerly load the one-to-many side.
#[derive(Debug, Clone)]
pub struct StockWithComments {
    pub stock: Stock,
    pub comments: Vec<Comment>,
}
