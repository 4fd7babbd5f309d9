//! sqlx-backed storage adapters.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{CommentRepository, StockRepository, StoreError, UserRepository};
use crate::dto::{UpdateCommentRequest, UpdateStockRequest};
use crate::models::{AppUser, Comment, NewUser, Stock, StockWithComments};
use crate::query::StockQuery;

#[derive(Clone)]
pub struct PgStockRepository {
    pool: PgPool,
}

impl PgStockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load comments for a batch of stocks in one round trip and bucket
    /// them by stock id.
    async fn comments_for(&self, ids: &[i32]) -> Result<HashMap<i32, Vec<Comment>>, StoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<Comment> = sqlx::query_as(
            "SELECT * FROM comments WHERE stock_id = ANY($1) ORDER BY created_on ASC",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i32, Vec<Comment>> = HashMap::new();
        for comment in rows {
            grouped.entry(comment.stock_id).or_default().push(comment);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl StockRepository for PgStockRepository {
    async fn list(&self, query: &StockQuery) -> Result<Vec<StockWithComments>, StoreError> {
        let rendered = query.to_sql();
        let mut q = sqlx::query_as::<_, Stock>(&rendered.sql);
        for param in &rendered.params {
            q = q.bind(param);
        }
        let stocks = q.fetch_all(&self.pool).await?;

        let ids: Vec<i32> = stocks.iter().map(|s| s.id).collect();
        let mut grouped = self.comments_for(&ids).await?;

        Ok(stocks
            .into_iter()
            .map(|stock| {
                let comments = grouped.remove(&stock.id).unwrap_or_default();
                StockWithComments { stock, comments }
            })
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Option<StockWithComments>, StoreError> {
        let stock: Option<Stock> = sqlx::query_as("SELECT * FROM stocks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match stock {
            Some(stock) => {
                let mut grouped = self.comments_for(&[stock.id]).await?;
                let comments = grouped.remove(&stock.id).unwrap_or_default();
                Ok(Some(StockWithComments { stock, comments }))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, stock: Stock) -> Result<Stock, StoreError> {
        let created = sqlx::query_as(
            "INSERT INTO stocks (symbol, company_name, purchase, last_div, industry, market_cap) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&stock.symbol)
        .bind(&stock.company_name)
        .bind(stock.purchase)
        .bind(stock.last_div)
        .bind(&stock.industry)
        .bind(stock.market_cap)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: i32, dto: &UpdateStockRequest) -> Result<Option<Stock>, StoreError> {
        let updated = sqlx::query_as(
            "UPDATE stocks SET symbol = $1, company_name = $2, purchase = $3, last_div = $4, \
             industry = $5, market_cap = $6 WHERE id = $7 RETURNING *",
        )
        .bind(&dto.symbol)
        .bind(&dto.company_name)
        .bind(dto.purchase)
        .bind(dto.last_div)
        .bind(&dto.industry)
        .bind(dto.market_cap)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<Option<Stock>, StoreError> {
        let deleted = sqlx::query_as("DELETE FROM stocks WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted)
    }

    async fn exists(&self, id: i32) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM stocks WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn list(&self) -> Result<Vec<Comment>, StoreError> {
        let comments = sqlx::query_as("SELECT * FROM comments ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(comments)
    }

    async fn get(&self, id: i32) -> Result<Option<Comment>, StoreError> {
        let comment = sqlx::query_as("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn create(&self, comment: Comment) -> Result<Comment, StoreError> {
        let created = sqlx::query_as(
            "INSERT INTO comments (title, content, created_on, stock_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&comment.title)
        .bind(&comment.content)
        .bind(comment.created_on)
        .bind(comment.stock_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        dto: &UpdateCommentRequest,
    ) -> Result<Option<Comment>, StoreError> {
        let updated = sqlx::query_as(
            "UPDATE comments SET title = $1, content = $2 WHERE id = $3 RETURNING *",
        )
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<Option<Comment>, StoreError> {
        let deleted = sqlx::query_as("DELETE FROM comments WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted)
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<AppUser, StoreError> {
        let created = sqlx::query_as(
            "INSERT INTO users (username, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await;

        match created {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Conflict("username or email already taken".to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, StoreError> {
        let user = sqlx::query_as("SELECT * FROM users WHERE lower(username) = lower($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
