use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{require_len, FieldErrors};
use crate::dto::comment::CommentDto;

/// Wire shape for a stock, comments flattened in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockDto {
    pub id: i32,
    pub symbol: String,
    pub company_name: String,
    pub purchase: Decimal,
    pub last_div: Decimal,
    pub industry: String,
    pub market_cap: i64,
    pub comments: Vec<CommentDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStockRequest {
    pub symbol: String,
    pub company_name: String,
    pub purchase: Decimal,
    pub last_div: Decimal,
    pub industry: String,
    pub market_cap: i64,
}

/// Full-replace update; no partial patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStockRequest {
    pub symbol: String,
    pub company_name: String,
    pub purchase: Decimal,
    pub last_div: Decimal,
    pub industry: String,
    pub market_cap: i64,
}

// The 10-char caps on symbol/company_name/industry match the VARCHAR(10)
// columns.
fn validate_stock_fields(
    errors: &mut FieldErrors,
    symbol: &str,
    company_name: &str,
    purchase: Decimal,
    last_div: Decimal,
    industry: &str,
    market_cap: i64,
) {
    require_len(errors, "symbol", symbol, 1, 10);
    require_len(errors, "company_name", company_name, 1, 10);
    require_len(errors, "industry", industry, 1, 10);

    if purchase < Decimal::ONE || purchase > Decimal::from(1_000_000_000) {
        errors.insert(
            "purchase".to_string(),
            "purchase must be between 1 and 1000000000".to_string(),
        );
    }
    if last_div < Decimal::new(1, 3) || last_div > Decimal::from(100) {
        errors.insert(
            "last_div".to_string(),
            "last_div must be between 0.001 and 100".to_string(),
        );
    }
    if !(1..=1_000_000_000).contains(&market_cap) {
        errors.insert(
            "market_cap".to_string(),
            "market_cap must be between 1 and 1000000000".to_string(),
        );
    }
}

impl CreateStockRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_stock_fields(
            &mut errors,
            &self.symbol,
            &self.company_name,
            self.purchase,
            self.last_div,
            &self.industry,
            self.market_cap,
        );
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl UpdateStockRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_stock_fields(
            &mut errors,
            &self.symbol,
            &self.company_name,
            self.purchase,
            self.last_div,
            &self.industry,
            self.market_cap,
        );
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

    fn valid_create() -> CreateStockRequest {
        CreateStockRequest {
            symbol: "MSFT".to_string(),
            company_name: "Microsoft".to_string(),
            purchase: Decimal::from(250),
            last_div: Decimal::new(6, 1),
            industry: "Tech".to_string(),
            market_cap: 1_000_000_000,
        }
    }

    #[test]
    fn accepts_valid_payload() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn rejects_company_name_over_ten_chars() {
        let mut dto = valid_create();
        dto.company_name = "Microsoft Corporation".to_string();
        let errors = dto.validate().unwrap_err();
        assert!(errors.contains_key("company_name"));
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        let mut dto = valid_create();
        dto.purchase = Decimal::ZERO;
        dto.last_div = Decimal::from(500);
        dto.market_cap = 0;
        let errors = dto.validate().unwrap_err();
        assert!(errors.contains_key("purchase"));
        assert!(errors.contains_key("last_div"));
        assert!(errors.contains_key("market_cap"));
    }

    #[test]
    fn rejects_empty_required_strings() {
        let mut dto = valid_create();
        dto.symbol = String::new();
        let errors = dto.validate().unwrap_err();
        assert!(errors.contains_key("symbol"));
    }
}
