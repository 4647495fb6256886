use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Capability, Claims};
use crate::error::ApiError;

/// Authenticated caller extracted from a verified JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

/// Attach an `AuthUser` when the request carries a valid bearer token.
///
/// Missing or invalid tokens are not an error here: the request continues
/// anonymously and each route's capability gate decides whether that is
/// enough.
pub async fn authenticate_jwt(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    match extract_jwt_from_headers(&headers).map(|token| auth::validate_jwt(&token)) {
        Ok(Ok(claims)) => {
            tracing::debug!("Authenticated {} (admin: {})", claims.username, claims.is_admin);
            request.extensions_mut().insert(AuthUser::from(claims));
        }
        Ok(Err(e)) => tracing::debug!("Continuing anonymously: {}", e),
        Err(reason) => tracing::trace!("Continuing anonymously: {}", reason),
    }

    next.run(request).await
}

/// Route gate: reject before any extractor, validator, or store access runs
pub async fn require_capability(
    State(required): State<Capability>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(request.extensions().get::<AuthUser>(), required)?;
    Ok(next.run(request).await)
}

/// Allow or deny `user` for a route requiring `required`.
///
/// Denials are always 401 so the response says nothing about whether the
/// target resource exists.
pub fn authorize(user: Option<&AuthUser>, required: Capability) -> Result<(), ApiError> {
    if required.permits(user) {
        return Ok(());
    }

    let username = user.map(|u| u.username.as_str()).unwrap_or("anonymous");
    tracing::warn!("Denied {} for route requiring {:?}", username, required);

    Err(ApiError::unauthorized(match required {
        Capability::AdminOnly if user.is_some() => "Admin access required",
        _ => "Authentication required",
    }))
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
