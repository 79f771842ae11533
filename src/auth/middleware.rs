use axum::{
    extract::{FromRef, MatchedPath, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{
    auth::{jwt::JwtKeys, policy::Access},
    error::AppError,
    state::AppState,
};

/// Request filter: resolves the access rule for the matched route, then
/// validates the bearer token and role. Verified claims are stored in the
/// request extensions for `AuthUser`.
pub async fn request_filter(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let pattern = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let access = state.policy.access_for(request.method(), &pattern);

    if access == Access::Public {
        return Ok(next.run(request).await);
    }

    let claims = {
        let token = bearer_token(request.headers())?;
        JwtKeys::from_ref(&state).verify(token).map_err(|e| {
            warn!(error = %e, route = %pattern, "invalid or expired token");
            AppError::Unauthorized("Invalid or expired token".into())
        })?
    };

    if !access.allows(claims.role) {
        warn!(email = %claims.sub, role = %claims.role, route = %pattern, "role not permitted");
        return Err(AppError::Forbidden("Access denied".into()));
    }

    debug!(email = %claims.sub, role = %claims.role, route = %pattern, "request authorized");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization header".into()))
}
