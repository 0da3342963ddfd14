use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use swot_db::models::User;
use validator::Validate;

use super::{CurrentUser, jwt};
use crate::{ApiState, error::ApiError, validation::validate_payload};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(auth_me).delete(delete_account))
        .route("/auth/logout", post(logout))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

fn sign_in(
    state: &ApiState,
    jar: PrivateCookieJar,
    user: &User,
) -> Result<PrivateCookieJar, ApiError> {
    let token = jwt::generate_jwt_token(user.id, user.email.clone(), &state.auth.jwt_secret)?;
    Ok(jar.add(jwt::create_auth_cookie(token, &state.environment)))
}

/// Create a user with their default topic and sign them in
async fn register(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, PrivateCookieJar, Json<User>), ApiError> {
    validate_payload(&payload)?;

    let user = state.hierarchy.create_user(&payload.email).await?;
    let jar = sign_in(&state, jar, &user)?;

    Ok((StatusCode::CREATED, jar, Json(user)))
}

/// Sign an existing user back in by email
async fn login(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(PrivateCookieJar, Json<User>), ApiError> {
    validate_payload(&payload)?;

    let user = state
        .hierarchy
        .find_user_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::Auth("Unknown email".to_string()))?;

    tracing::debug!(user_id = %user.id, "User signed in");
    let jar = sign_in(&state, jar, &user)?;
    Ok((jar, Json(user)))
}

async fn auth_me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// Delete the signed-in user together with all their topics and quizzes
async fn delete_account(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    CurrentUser(user): CurrentUser,
) -> Result<(PrivateCookieJar, Json<User>), ApiError> {
    let deleted = state.hierarchy.delete_user(&user).await?;
    Ok((jar.remove(jwt::removal_cookie()), Json(deleted)))
}

async fn logout(jar: PrivateCookieJar) -> (PrivateCookieJar, Json<serde_json::Value>) {
    (
        jar.remove(jwt::removal_cookie()),
        Json(serde_json::json!({ "message": "Logged out successfully" })),
    )
}
