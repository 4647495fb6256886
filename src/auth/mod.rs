use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::middleware::AuthUser;

/// Token payload: `{username, isAdmin, iat?, exp?}`.
///
/// Tokens minted without `exp` never expire; when `exp` is present it is
/// enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            username: username.into(),
            is_admin,
            exp: Some(exp),
            iat: Some(now.timestamp()),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("JWT secret not configured")]
    InvalidSecret,
}

/// Minimum capability a route demands, fixed when the route is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Public,
    AuthenticatedAny,
    AdminOnly,
}

impl Capability {
    pub fn permits(self, user: Option<&AuthUser>) -> bool {
        match self {
            Capability::Public => true,
            Capability::AuthenticatedAny => user.is_some(),
            Capability::AdminOnly => user.is_some_and(|u| u.is_admin),
        }
    }
}

/// Sign `claims` with the configured secret
pub fn generate_jwt(claims: &Claims) -> Result<String, JwtError> {
    encode_jwt(claims, &config::config().security.jwt_secret)
}

/// Verify signature and expiry with the configured secret
pub fn validate_jwt(token: &str) -> Result<Claims, JwtError> {
    decode_jwt(token, &config::config().security.jwt_secret)
}

pub fn encode_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.required_spec_claims.clear();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}
