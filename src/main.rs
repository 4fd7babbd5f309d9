use stocks_api::auth::TokenService;
use stocks_api::config::AppConfig;
use stocks_api::{app, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stocks_api=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("starting Stocks API in {:?} mode", config.environment);

    // Missing signing key is fatal misconfiguration; fail before binding.
    let tokens = TokenService::from_config(&config.security)?;

    let pool = database::connect(&config.database).await?;
    database::migrate(&pool).await?;

    let state = AppState::with_postgres(pool, tokens, &config);
    let router = app(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Stocks API listening on http://{}", bind_addr);
    axum::serve(listener, router).await?;

    Ok(())
}
