//! Authentication middleware for JWT token validation

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use common::jwt::TokenType;
use tracing::warn;

use crate::{error::ApiError, state::AppState};

/// Authenticated caller, derived from verified token claims
///
/// Handlers receive it as an explicit `Extension<AuthUser>` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
}

/// Authentication middleware
///
/// Rejects the request with 401 before the handler runs unless it carries a
/// valid, unexpired access token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(ApiError::Unauthorized)?;

    let claims = state
        .jwt_service
        .validate_token_of_type(bearer.token(), TokenType::Access)
        .map_err(|e| {
            warn!("Rejected bearer token: {}", e);
            ApiError::Unauthorized
        })?;

    req.extensions_mut().insert(AuthUser { id: claims.user_id });

    Ok(next.run(req).await)
}
