use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use swot_db::models::User;
use uuid::Uuid;

use super::{AUTH_COOKIE, jwt::verify_jwt_token};
use crate::{error::ApiError, hierarchy::HierarchyService, state::AuthConfig};

/// Authenticated user extractor
///
/// Reads the private `auth_token` cookie and validates the JWT inside it. Only the
/// token is checked; use [`CurrentUser`] when the handler needs the user document.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AuthConfig: FromRef<S>,
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_config = AuthConfig::from_ref(state);

        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Auth("Failed to read cookies".to_string()))?;

        let token = jar
            .get(AUTH_COOKIE)
            .ok_or_else(|| ApiError::Auth("Not authenticated".to_string()))?
            .value()
            .to_owned();

        let claims = verify_jwt_token(&token, &auth_config.jwt_secret)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Auth("Invalid user ID in token".to_string()))?;

        Ok(Self {
            user_id,
            email: claims.email,
        })
    }
}

/// The authenticated user's document, freshly loaded from the store
///
/// Rejects with 401 when the token is valid but the user no longer exists.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthConfig: FromRef<S>,
    Key: FromRef<S>,
    HierarchyService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        let hierarchy = HierarchyService::from_ref(state);

        let user = hierarchy.find_user(auth_user.user_id).await?.ok_or_else(|| {
            tracing::warn!(user_id = %auth_user.user_id, "Token refers to a deleted user");
            ApiError::Auth("User no longer exists".to_string())
        })?;

        Ok(Self(user))
    }
}
