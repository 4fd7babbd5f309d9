use axum::{extract::State, Json};

use crate::dto::{LoginRequest, NewUserDto, RegisterRequest};
use crate::error::ApiError;
use crate::models::{NewUser, Role};
use crate::state::AppState;

/// POST /api/v1/accounts/register
///
/// Creates the account with the default role and returns a freshly issued
/// token (register-then-login semantics). Failures are typed: 400 for
/// policy violations, 409 for duplicate username/email.
pub async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterRequest>,
) -> Result<Json<NewUserDto>, ApiError> {
    dto.validate()
        .map_err(|errors| ApiError::validation_error("Invalid registration payload", errors))?;

    let password_hash = bcrypt::hash(&dto.password, bcrypt::DEFAULT_COST)?;
    let user = state
        .users
        .create(NewUser {
            username: dto.username,
            email: dto.email,
            password_hash,
            role: Role::User,
        })
        .await?;

    let token = state.tokens.create_token(&user)?;
    tracing::info!(username = %user.username, "registered new account");

    Ok(Json(NewUserDto {
        username: user.username,
        email: user.email,
        token,
    }))
}

/// POST /api/v1/accounts/login
///
/// Unknown usernames and wrong passwords both answer 401 with the same
/// message, never a 500.
pub async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginRequest>,
) -> Result<Json<NewUserDto>, ApiError> {
    dto.validate()
        .map_err(|errors| ApiError::validation_error("Invalid login payload", errors))?;

    let user = state
        .users
        .find_by_username(&dto.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    if !bcrypt::verify(&dto.password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let token = state.tokens.create_token(&user)?;

    Ok(Json(NewUserDto {
        username: user.username,
        email: user.email,
        token,
    }))
}
