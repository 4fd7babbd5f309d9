use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration. Loaded once in `main` via [`AppConfig::from_env`]
/// and passed explicitly to the components that need it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Hard cap on the stock list page size, regardless of the requested
    /// page_size query parameter.
    pub max_page_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_signing_key: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiry_days: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Environment presets first, specific env vars override.
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }
        if let Ok(v) = env::var("API_MAX_PAGE_SIZE") {
            self.api.max_page_size = v.parse().unwrap_or(self.api.max_page_size);
        }
        if let Ok(v) = env::var("JWT_SIGNING_KEY") {
            self.security.jwt_signing_key = v;
        }
        if let Ok(v) = env::var("JWT_ISSUER") {
            self.security.jwt_issuer = v;
        }
        if let Ok(v) = env::var("JWT_AUDIENCE") {
            self.security.jwt_audience = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_DAYS") {
            self.security.jwt_expiry_days = v.parse().unwrap_or(self.security.jwt_expiry_days);
        }
        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            api: ApiConfig { max_page_size: 1000 },
            security: SecurityConfig {
                // Dev-only default so the server starts out of the box;
                // production requires JWT_SIGNING_KEY.
                jwt_signing_key: "insecure-development-signing-key".to_string(),
                jwt_issuer: "stocks-api".to_string(),
                jwt_audience: "stocks-api-clients".to_string(),
                jwt_expiry_days: 7,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connect_timeout_secs: 10,
            },
            api: ApiConfig { max_page_size: 500 },
            security: SecurityConfig {
                jwt_signing_key: String::new(),
                jwt_issuer: "stocks-api".to_string(),
                jwt_audience: "stocks-api-clients".to_string(),
                jwt_expiry_days: 7,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            api: ApiConfig { max_page_size: 100 },
            security: SecurityConfig {
                jwt_signing_key: String::new(),
                jwt_issuer: "stocks-api".to_string(),
                jwt_audience: "stocks-api-clients".to_string(),
                jwt_expiry_days: 7,
            },
        }
    }
}
