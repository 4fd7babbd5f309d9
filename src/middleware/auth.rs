use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::models::Role;
use crate::state::AppState;

/// Authenticated user context extracted from a validated JWT.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub role: Option<Role>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.given_name,
            email: claims.email,
            role: Role::parse(&claims.role),
        }
    }
}

impl AuthUser {
    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        self.role.map_or(false, |role| allowed.contains(&role))
    }
}

/// JWT authentication middleware: validates the bearer token and injects
/// an [`AuthUser`] into request extensions for downstream handlers.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;
    let claims = state.tokens.validate(&token)?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_and_malformed_headers() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcg=="));
        assert!(extract_bearer_token(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn role_checks_use_the_allow_list() {
        let user = AuthUser {
            user_id: 1,
            username: "trader1".to_string(),
            email: "trader1@example.com".to_string(),
            role: Some(Role::User),
        };
        assert!(user.has_any_role(&[Role::Admin, Role::User]));
        assert!(!user.has_any_role(&[Role::Admin]));

        let no_role = AuthUser { role: None, ..user };
        assert!(!no_role.has_any_role(&[Role::Admin, Role::User]));
    }
}
