use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AUTH_COOKIE;
use crate::{config::Environment, error::ApiError};

/// Lifetime of issued tokens and of the cookie carrying them
pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

/// Generate a JWT token for a user
pub fn generate_jwt_token(user_id: Uuid, email: String, jwt_secret: &str) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email,
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a JWT token
pub fn verify_jwt_token(token: &str, jwt_secret: &str) -> Result<Claims, ApiError> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Auth("Invalid or expired token".to_string()))?;

    Ok(token_data.claims)
}

/// Create the auth cookie holding `token`
///
/// Secure (HTTPS-only) except in development.
pub fn create_auth_cookie(token: String, environment: &Environment) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .max_age(time::Duration::hours(TOKEN_TTL_HOURS))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!environment.is_development())
        .build()
}

/// Cookie that tells the browser to drop the auth cookie
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, "")).path("/").build()
}
