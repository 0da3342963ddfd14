use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use swot_db::models::Quiz;
use swot_question::{GradeReport, grade};
use uuid::Uuid;

use super::model::{CreateQuizRequest, CreateQuizResponse, GradeRequest, SaveQuizRequest};
use crate::{ApiState, auth::CurrentUser, error::ApiError, validation::validate_payload};

/// Create the quiz routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/quizzes", post(create_quiz))
        .route(
            "/quizzes/{id}",
            get(get_quiz).put(save_quiz).delete(delete_quiz),
        )
        .route("/quizzes/{id}/grade", post(grade_quiz))
}

async fn create_quiz(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<(StatusCode, Json<CreateQuizResponse>), ApiError> {
    validate_payload(&payload)?;

    let (quiz, user) = state.hierarchy.create_quiz(payload.into(), &user).await?;
    Ok((StatusCode::CREATED, Json(CreateQuizResponse { quiz, user })))
}

/// Full quiz, questions included
async fn get_quiz(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Quiz>, ApiError> {
    Ok(Json(state.hierarchy.get_quiz(id, &user).await?))
}

async fn save_quiz(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaveQuizRequest>,
) -> Result<Json<Quiz>, ApiError> {
    validate_payload(&payload)?;

    let quiz = state.hierarchy.update_quiz(id, payload.into(), &user).await?;
    Ok(Json(quiz))
}

async fn delete_quiz(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Quiz>, ApiError> {
    let quiz = state.hierarchy.get_quiz(id, &user).await?;
    let deleted = state.hierarchy.delete_quiz(&quiz).await?;
    Ok(Json(deleted))
}

async fn grade_quiz(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<GradeRequest>,
) -> Result<Json<GradeReport>, ApiError> {
    let quiz = state.hierarchy.get_quiz(id, &user).await?;
    let report = grade(&quiz.questions, &payload.responses);

    tracing::debug!(
        quiz_id = %quiz.id,
        correct = report.correct,
        total = report.total,
        "Graded quiz attempt"
    );
    Ok(Json(report))
}
