pub mod accounts;
pub mod comments;
pub mod stocks;
