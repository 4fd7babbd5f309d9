use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_len, FieldErrors};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub stock_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub title: String,
    pub content: String,
}

/// Replaces title and content only; timestamps and the stock link are
/// immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    pub title: String,
    pub content: String,
}

fn validate_comment_fields(errors: &mut FieldErrors, title: &str, content: &str) {
    require_len(errors, "title", title, 5, 280);
    require_len(errors, "content", content, 5, 280);
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_comment_fields(&mut errors, &self.title, &self.content);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl UpdateCommentRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_comment_fields(&mut errors, &self.title, &self.content);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_title_and_content() {
        let dto = CreateCommentRequest {
            title: "Hi".to_string(),
            content: "ok".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("content"));
    }

    #[test]
    fn rejects_oversized_content() {
        let dto = UpdateCommentRequest {
            title: "Solid pick".to_string(),
            content: "x".repeat(281),
        };
        assert!(dto.validate().unwrap_err().contains_key("content"));
    }

    #[test]
    fn accepts_valid_comment() {
        let dto = CreateCommentRequest {
            title: "Solid pick".to_string(),
            content: "Earnings beat expectations again.".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
