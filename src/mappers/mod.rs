//! Pure translations between persisted entities and wire DTOs.

use chrono::Utc;

use crate::dto::{
    CommentDto, CreateCommentRequest, CreateStockRequest, StockDto, UpdateCommentRequest,
    UpdateStockRequest,
};
use crate::models::{Comment, Stock, StockWithComments};

pub fn stock_to_dto(stock: &Stock, comments: &[Comment]) -> StockDto {
    StockDto {
        id: stock.id,
        symbol: stock.symbol.clone(),
        company_name: stock.company_name.clone(),
        purchase: stock.purchase,
        last_div: stock.last_div,
        industry: stock.industry.clone(),
        market_cap: stock.market_cap,
        comments: comments.iter().map(comment_to_dto).collect(),
    }
}

pub fn stock_with_comments_to_dto(record: &StockWithComments) -> StockDto {
    stock_to_dto(&record.stock, &record.comments)
}

/// The store assigns the id on insert; zero is a placeholder.
pub fn create_request_to_stock(dto: &CreateStockRequest) -> Stock {
    Stock {
        id: 0,
        symbol: dto.symbol.clone(),
        company_name: dto.company_name.clone(),
        purchase: dto.purchase,
        last_div: dto.last_div,
        industry: dto.industry.clone(),
        market_cap: dto.market_cap,
    }
}

/// Full field replace of everything mutable; the id stays.
pub fn apply_stock_update(stock: &mut Stock, dto: &UpdateStockRequest) {
    stock.symbol = dto.symbol.clone();
    stock.company_name = dto.company_name.clone();
    stock.purchase = dto.purchase;
    stock.last_div = dto.last_div;
    stock.industry = dto.industry.clone();
    stock.market_cap = dto.market_cap;
}

pub fn comment_to_dto(comment: &Comment) -> CommentDto {
    CommentDto {
        id: comment.id,
        title: comment.title.clone(),
        content: comment.content.clone(),
        created_on: comment.created_on,
        stock_id: comment.stock_id,
    }
}

pub fn create_request_to_comment(dto: &CreateCommentRequest, stock_id: i32) -> Comment {
    Comment {
        id: 0,
        title: dto.title.clone(),
        content: dto.content.clone(),
        created_on: Utc::now(),
        stock_id,
    }
}

pub fn apply_comment_update(comment: &mut Comment, dto: &UpdateCommentRequest) {
    comment.title = dto.title.clone();
    comment.content = dto.content.clone();
}
