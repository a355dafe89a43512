use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    models::{Error, TokenClaim, User},
    AppState,
};

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

async fn decode_user(state: &AppState, token: &str) -> Result<Option<User>, Error> {
    let claims = match decode::<TokenClaim>(
        token,
        &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
        &Validation::default(),
    ) {
        Ok(data) => data.claims,
        Err(_) => return Ok(None),
    };
    Ok(state.db.get_user_by_email(&claims.sub).await?)
}

/// Requires a valid bearer token and stores the resolved `User` in the
/// request extensions for the handler
pub async fn auth_guard(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Error> {
    let token = bearer_token(&req)
        .ok_or((StatusCode::UNAUTHORIZED, "Missing bearer token"))?
        .to_string();
    let user = decode_user(&state, &token)
        .await?
        .ok_or((StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Gate for write endpoints. Read routes are never layered with this; writes
/// require a valid token whose user is an admin or a manager.
/// Unauthenticated write attempts get 403, not 401.
pub async fn manager_guard(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Error> {
    const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";

    let token = bearer_token(&req)
        .ok_or((StatusCode::FORBIDDEN, NOT_AUTHENTICATED))?
        .to_string();
    let user = decode_user(&state, &token)
        .await?
        .ok_or((StatusCode::FORBIDDEN, NOT_AUTHENTICATED))?;
    if !user.role.can_manage() {
        return Err(Error::new(
            StatusCode::FORBIDDEN,
            "You do not have permission to perform this action.",
        ));
    }
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
