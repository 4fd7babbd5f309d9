pub mod auth;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod mappers;
pub mod middleware;
pub mod models;
pub mod query;
pub mod repository;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use state::AppState;

/// Build the full router over the given state. Integration tests drive
/// this directly with in-memory repositories.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(account_routes())
        .merge(stock_routes(state.clone()))
        .merge(comment_routes())
        .merge(v2_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn account_routes() -> Router<AppState> {
    use handlers::v1::accounts;

    Router::new()
        .route("/api/v1/accounts/register", post(accounts::register))
        .route("/api/v1/accounts/login", post(accounts::login))
}

fn stock_routes(state: AppState) -> Router<AppState> {
    use handlers::v1::stocks;

    // Only the listing sits behind the JWT layer; the rest of the CRUD
    // surface is open.
    let protected = Router::new()
        .route("/api/v1/stocks", get(stocks::list))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::jwt_auth_middleware,
        ));

    let open = Router::new()
        .route("/api/v1/stocks", post(stocks::create))
        .route(
            "/api/v1/stocks/:id",
            get(stocks::get).put(stocks::update).delete(stocks::delete),
        );

    protected.merge(open)
}

fn comment_routes() -> Router<AppState> {
    use handlers::v1::comments;

    // POST /api/v1/comments/:id takes a stock id; the other verbs take a
    // comment id. One route entry, since the path shapes are identical.
    Router::new()
        .route("/api/v1/comments", get(comments::list))
        .route(
            "/api/v1/comments/:id",
            get(comments::get)
                .post(comments::create)
                .put(comments::update)
                .delete(comments::delete),
        )
}

fn v2_routes() -> Router<AppState> {
    use handlers::v2::stocks;

    Router::new()
        .route("/api/v2/stock", get(stocks::list).post(stocks::create))
        .route(
            "/api/v2/stock/:id",
            get(stocks::get).put(stocks::update).delete(stocks::delete),
        )
}
