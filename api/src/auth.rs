use crate::{
    errors::ApiError,
    models::{Actor, UserId},
    states::AppState,
};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload. `sub` is the user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

impl Claims {
    fn issue(user_id: &UserId, email: &str, ttl: Duration) -> Result<Self, ApiError> {
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| ApiError::InternalError("token expiry overflows".into()))?;

        Ok(Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: expires_at.timestamp() as usize,
        })
    }

    pub fn user_id(&self) -> Option<UserId> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Sign an HS256 token for `user_id` valid for `ttl`.
pub fn create_token(
    user_id: &UserId,
    email: &str,
    secret: &str,
    ttl: Duration,
) -> Result<String, ApiError> {
    let claims = Claims::issue(user_id, email, ttl)?;
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &key)
        .map_err(|e| ApiError::InternalError(format!("signing token: {e}")))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Decode and verify the bearer token in `headers`, including expiry.
pub fn validate_token(headers: &HeaderMap, secret: &str) -> Result<Claims, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;
    let key = DecodingKey::from_secret(secret.as_bytes());

    decode::<Claims>(token, &key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| ApiError::Unauthorized)
}

/// Handlers that take an `Actor` require a valid bearer token for a user
/// that still exists. Anything else is rejected with 401 before the handler
/// runs.
impl FromRequestParts<AppState> for Actor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = validate_token(&parts.headers, &state.jwt_secret)?;
        let user_id = claims.user_id().ok_or(ApiError::Unauthorized)?;

        if !state.users.contains_key(&user_id) {
            return Err(ApiError::Unauthorized);
        }

        Ok(Actor::new(user_id))
    }
}
