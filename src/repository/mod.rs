//! Persistence-access traits plus the two storage adapters.
//!
//! Every operation keeps the same contract: absent ids come back as
//! `Ok(None)`, never as an error. Callers translate `None` into an HTTP
//! status.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::dto::{UpdateCommentRequest, UpdateStockRequest};
use crate::models::{AppUser, Comment, NewUser, Stock, StockWithComments};
use crate::query::StockQuery;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[async_trait]
pub trait StockRepository: Send + Sync {
    async fn list(&self, query: &StockQuery) -> Result<Vec<StockWithComments>, StoreError>;
    async fn get(&self, id: i32) -> Result<Option<StockWithComments>, StoreError>;
    async fn create(&self, stock: Stock) -> Result<Stock, StoreError>;
    async fn update(&self, id: i32, dto: &UpdateStockRequest) -> Result<Option<Stock>, StoreError>;
    async fn delete(&self, id: i32) -> Result<Option<Stock>, StoreError>;
    async fn exists(&self, id: i32) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Comment>, StoreError>;
    async fn get(&self, id: i32) -> Result<Option<Comment>, StoreError>;
    async fn create(&self, comment: Comment) -> Result<Comment, StoreError>;
    async fn update(
        &self,
        id: i32,
        dto: &UpdateCommentRequest,
    ) -> Result<Option<Comment>, StoreError>;
    async fn delete(&self, id: i32) -> Result<Option<Comment>, StoreError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `StoreError::Conflict` when the username or email is
    /// already taken.
    async fn create(&self, user: NewUser) -> Result<AppUser, StoreError>;
    /// Username lookup is case-insensitive.
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, StoreError>;
}
