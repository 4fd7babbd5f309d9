pub mod account;
pub mod comment;
pub mod stock;

use std::collections::HashMap;

pub use account::{LoginRequest, NewUserDto, RegisterRequest};
pub use comment::{CommentDto, CreateCommentRequest, UpdateCommentRequest};
pub use stock::{CreateStockRequest, StockDto, UpdateStockRequest};

/// Field name to message, accumulated by DTO validation and surfaced as a
/// 400 with `field_errors`.
pub type FieldErrors = HashMap<String, String>;

pub(crate) fn require_len(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    if value.len() < min {
        errors.insert(field.to_string(), format!("{field} must be at least {min} characters"));
    } else if value.len() > max {
        errors.insert(field.to_string(), format!("{field} cannot be over {max} characters"));
    }
}
