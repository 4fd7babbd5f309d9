//! Filter/sort/page specification for the stock list endpoint.
//!
//! The same `StockQuery` drives both storage adapters: the Postgres
//! repository renders it to SQL with bound parameters, and the in-memory
//! repository applies it as plain functions over a `Vec<Stock>`. Keeping
//! the semantics here means the query logic is testable without a
//! database.

use serde::Deserialize;

use crate::models::Stock;

pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Sort keys accepted on the list endpoint. Anything outside this set is
/// silently ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Symbol,
    CompanyName,
    Industry,
    Purchase,
    LastDiv,
    MarketCap,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "symbol" => Some(SortKey::Symbol),
            "companyname" | "company_name" => Some(SortKey::CompanyName),
            "industry" => Some(SortKey::Industry),
            "purchase" => Some(SortKey::Purchase),
            "lastdiv" | "last_div" => Some(SortKey::LastDiv),
            "marketcap" | "market_cap" => Some(SortKey::MarketCap),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Symbol => "symbol",
            SortKey::CompanyName => "company_name",
            SortKey::Industry => "industry",
            SortKey::Purchase => "purchase",
            SortKey::LastDiv => "last_div",
            SortKey::MarketCap => "market_cap",
        }
    }
}

/// Query-string parameters on `GET /api/v1/stocks`, deserialized directly
/// from the URL. Never persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StockQuery {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    pub sort_by: Option<String>,
    pub is_descending: bool,
    pub page_number: i64,
    pub page_size: i64,
}

impl Default for StockQuery {
    fn default() -> Self {
        Self {
            symbol: None,
            company_name: None,
            sort_by: None,
            is_descending: false,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A rendered SQL statement plus its bound parameters, in order.
#[derive(Debug, Clone)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl StockQuery {
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_by
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(SortKey::parse)
    }

    /// Offset of the first row on the requested page. Saturates instead of
    /// overflowing; a page past the end of the data is already empty.
    pub fn offset(&self) -> i64 {
        let page = self.page_number.max(1);
        (page - 1).saturating_mul(self.limit())
    }

    /// Effective page size. Non-positive sizes fall back to the default.
    pub fn limit(&self) -> i64 {
        if self.page_size > 0 {
            self.page_size
        } else {
            DEFAULT_PAGE_SIZE
        }
    }

    /// Cap the page size. Handlers apply the configured maximum before the
    /// query reaches a store.
    pub fn clamp_page_size(&mut self, max: i64) {
        if self.limit() > max {
            self.page_size = max;
        }
    }

    /// Render to `SELECT * FROM stocks ...` with positional parameters.
    ///
    /// Substring filters use `strpos` so the value is matched literally,
    /// with no LIKE wildcard escaping concerns. Filters are case-sensitive.
    pub fn to_sql(&self) -> SqlQuery {
        let mut params: Vec<String> = Vec::new();
        let mut conditions: Vec<String> = Vec::new();

        if let Some(name) = self.company_name.as_deref().filter(|s| !s.is_empty()) {
            params.push(name.to_string());
            conditions.push(format!("strpos(company_name, ${}) > 0", params.len()));
        }
        if let Some(symbol) = self.symbol.as_deref().filter(|s| !s.is_empty()) {
            params.push(symbol.to_string());
            conditions.push(format!("strpos(symbol, ${}) > 0", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let order_clause = match self.sort_key() {
            Some(key) => format!(
                "ORDER BY {} {}",
                key.column(),
                if self.is_descending { "DESC" } else { "ASC" }
            ),
            // Stable paging needs a deterministic order even when no sort
            // key was requested.
            None => "ORDER BY id ASC".to_string(),
        };

        let sql = ["SELECT * FROM stocks".to_string(), where_clause, order_clause]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            + &format!(" LIMIT {} OFFSET {}", self.limit(), self.offset());

        SqlQuery { sql, params }
    }

    /// Apply the same filter/sort/page pipeline in memory.
    pub fn apply(&self, mut stocks: Vec<Stock>) -> Vec<Stock> {
        if let Some(name) = self.company_name.as_deref().filter(|s| !s.is_empty()) {
            stocks.retain(|s| s.company_name.contains(name));
        }
        if let Some(symbol) = self.symbol.as_deref().filter(|s| !s.is_empty()) {
            stocks.retain(|s| s.symbol.contains(symbol));
        }

        if let Some(key) = self.sort_key() {
            match key {
                SortKey::Symbol => stocks.sort_by(|a, b| a.symbol.cmp(&b.symbol)),
                SortKey::CompanyName => stocks.sort_by(|a, b| a.company_name.cmp(&b.company_name)),
                SortKey::Industry => stocks.sort_by(|a, b| a.industry.cmp(&b.industry)),
                SortKey::Purchase => stocks.sort_by(|a, b| a.purchase.cmp(&b.purchase)),
                SortKey::LastDiv => stocks.sort_by(|a, b| a.last_div.cmp(&b.last_div)),
                SortKey::MarketCap => stocks.sort_by(|a, b| a.market_cap.cmp(&b.market_cap)),
            }
            if self.is_descending {
                stocks.reverse();
            }
        }

        stocks
            .into_iter()
            .skip(self.offset() as usize)
            .take(self.limit() as usize)
            .collect()
    }
}
