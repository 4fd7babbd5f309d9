use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::repository::postgres::{PgCommentRepository, PgStockRepository, PgUserRepository};
use crate::repository::{CommentRepository, StockRepository, UserRepository};

/// Shared application state: repositories and the token service behind
/// trait objects, constructed explicitly at startup.
#[derive(Clone)]
pub struct AppState {
    pub stocks: Arc<dyn StockRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<TokenService>,
    pub max_page_size: i64,
    /// Present when running against Postgres; `/health` reports degraded
    /// when the ping fails. In-memory deployments skip the ping.
    pub pool: Option<PgPool>,
}

impl AppState {
    /// Wire the Postgres adapters onto one shared pool.
    pub fn with_postgres(pool: PgPool, tokens: TokenService, config: &AppConfig) -> Self {
        Self {
            stocks: Arc::new(PgStockRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            tokens: Arc::new(tokens),
            max_page_size: config.api.max_page_size,
            pool: Some(pool),
        }
    }
}
