//! In-memory storage adapters.
//!
//! Used by the test suites, which exercise the full router without a
//! database. Semantics mirror the Postgres adapters: same null-on-absent
//! contract, same case-sensitive substring filters.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CommentRepository, StockRepository, StoreError, UserRepository};
use crate::dto::{UpdateCommentRequest, UpdateStockRequest};
use crate::mappers::{apply_comment_update, apply_stock_update};
use crate::models::{AppUser, Comment, NewUser, Stock, StockWithComments};
use crate::query::StockQuery;

pub struct MemoryStockRepository {
    stocks: Mutex<Vec<Stock>>,
    comments: Mutex<Vec<Comment>>,
    next_stock_id: AtomicI32,
    next_comment_id: AtomicI32,
}

impl MemoryStockRepository {
    pub fn new() -> Self {
        Self {
            stocks: Mutex::new(Vec::new()),
            comments: Mutex::new(Vec::new()),
            next_stock_id: AtomicI32::new(1),
            next_comment_id: AtomicI32::new(1),
        }
    }

    fn comments_for(&self, stock_id: i32) -> Vec<Comment> {
        self.comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.stock_id == stock_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StockRepository for MemoryStockRepository {
    async fn list(&self, query: &StockQuery) -> Result<Vec<StockWithComments>, StoreError> {
        let snapshot = self.stocks.lock().unwrap().clone();
        Ok(query
            .apply(snapshot)
            .into_iter()
            .map(|stock| {
                let comments = self.comments_for(stock.id);
                StockWithComments { stock, comments }
            })
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Option<StockWithComments>, StoreError> {
        let stock = self.stocks.lock().unwrap().iter().find(|s| s.id == id).cloned();
        Ok(stock.map(|stock| {
            let comments = self.comments_for(stock.id);
            StockWithComments { stock, comments }
        }))
    }

    async fn create(&self, mut stock: Stock) -> Result<Stock, StoreError> {
        stock.id = self.next_stock_id.fetch_add(1, Ordering::SeqCst);
        self.stocks.lock().unwrap().push(stock.clone());
        Ok(stock)
    }

    async fn update(&self, id: i32, dto: &UpdateStockRequest) -> Result<Option<Stock>, StoreError> {
        let mut stocks = self.stocks.lock().unwrap();
        Ok(stocks.iter_mut().find(|s| s.id == id).map(|stock| {
            apply_stock_update(stock, dto);
            stock.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Stock>, StoreError> {
        let mut stocks = self.stocks.lock().unwrap();
        let position = stocks.iter().position(|s| s.id == id);
        let removed = position.map(|index| stocks.remove(index));
        if removed.is_some() {
            // The schema cascades comment deletion; mirror that here.
            self.comments.lock().unwrap().retain(|c| c.stock_id != id);
        }
        Ok(removed)
    }

    async fn exists(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.stocks.lock().unwrap().iter().any(|s| s.id == id))
    }
}

/// Comment adapter sharing the stock repository's comment table, so that
/// stock reads see comments created through this trait.
pub struct MemoryCommentRepository {
    stocks: std::sync::Arc<MemoryStockRepository>,
}

impl MemoryCommentRepository {
    pub fn new(stocks: std::sync::Arc<MemoryStockRepository>) -> Self {
        Self { stocks }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn list(&self) -> Result<Vec<Comment>, StoreError> {
        Ok(self.stocks.comments.lock().unwrap().clone())
    }

    async fn get(&self, id: i32) -> Result<Option<Comment>, StoreError> {
        Ok(self
            .stocks
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(&self, mut comment: Comment) -> Result<Comment, StoreError> {
        comment.id = self.stocks.next_comment_id.fetch_add(1, Ordering::SeqCst);
        self.stocks.comments.lock().unwrap().push(comment.clone());
        Ok(comment)
    }

    async fn update(
        &self,
        id: i32,
        dto: &UpdateCommentRequest,
    ) -> Result<Option<Comment>, StoreError> {
        let mut comments = self.stocks.comments.lock().unwrap();
        Ok(comments.iter_mut().find(|c| c.id == id).map(|comment| {
            apply_comment_update(comment, dto);
            comment.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Comment>, StoreError> {
        let mut comments = self.stocks.comments.lock().unwrap();
        let position = comments.iter().position(|c| c.id == id);
        Ok(position.map(|index| comments.remove(index)))
    }
}

pub struct MemoryUserRepository {
    users: Mutex<Vec<AppUser>>,
    next_id: AtomicI32,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<AppUser, StoreError> {
        let mut users = self.users.lock().unwrap();
        let taken = users.iter().any(|u| {
            u.username.eq_ignore_ascii_case(&user.username)
                || u.email.eq_ignore_ascii_case(&user.email)
        });
        if taken {
            return Err(StoreError::Conflict("username or email already taken".to_string()));
        }
        let created = AppUser {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role.as_str().to_string(),
            created_at: chrono::Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use rust_decimal::Decimal;

    fn new_stock(symbol: &str) -> Stock {
        Stock {
            id: 0,
            symbol: symbol.to_string(),
            company_name: "Acme".to_string(),
            purchase: Decimal::from(100),
            last_div: Decimal::new(5, 1),
            industry: "Tech".to_string(),
            market_cap: 1_000_000,
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_field_equal_record_with_fresh_id() {
        let repo = MemoryStockRepository::new();
        let created = repo.create(new_stock("AAPL")).await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock, created);
        assert!(fetched.comments.is_empty());
    }

    #[tokio::test]
    async fn delete_then_get_returns_none() {
        let repo = MemoryStockRepository::new();
        let created = repo.create(new_stock("MSFT")).await.unwrap();

        let deleted = repo.delete(created.id).await.unwrap();
        assert_eq!(deleted, Some(created.clone()));
        assert!(repo.get(created.id).await.unwrap().is_none());

        // Deleting an absent id is not an error.
        assert!(repo.delete(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_on_absent_id_returns_none() {
        let repo = MemoryStockRepository::new();
        let dto = UpdateStockRequest {
            symbol: "X".to_string(),
            company_name: "X Corp".to_string(),
            purchase: Decimal::from(2),
            last_div: Decimal::new(1, 2),
            industry: "None".to_string(),
            market_cap: 1,
        };
        assert!(repo.update(404, &dto).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_a_stock_cascades_to_its_comments() {
        let stocks = std::sync::Arc::new(MemoryStockRepository::new());
        let comments = MemoryCommentRepository::new(stocks.clone());

        let stock = stocks.create(new_stock("GOOGL")).await.unwrap();
        let comment = comments
            .create(crate::mappers::create_request_to_comment(
                &crate::dto::CreateCommentRequest {
                    title: "Strong buy".to_string(),
                    content: "Search is a moat.".to_string(),
                },
                stock.id,
            ))
            .await
            .unwrap();

        stocks.delete(stock.id).await.unwrap();
        assert!(comments.get(comment.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = MemoryUserRepository::new();
        let user = NewUser {
            username: "trader1".to_string(),
            email: "trader1@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
        };
        repo.create(user.clone()).await.unwrap();

        let duplicate = NewUser {
            username: "TRADER1".to_string(),
            email: "other@example.com".to_string(),
            ..user
        };
        assert!(matches!(
            repo.create(duplicate).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn username_lookup_is_case_insensitive() {
        let repo = MemoryUserRepository::new();
        repo.create(NewUser {
            username: "Trader1".to_string(),
            email: "trader1@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
        })
        .await
        .unwrap();

        let found = repo.find_by_username("trader1").await.unwrap();
        assert_eq!(found.unwrap().username, "Trader1");
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }
}
