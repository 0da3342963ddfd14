use serde::{Deserialize, Serialize};
use swot_db::models::{Quiz, User};
use swot_question::{QuestionSource, Response};
use uuid::Uuid;
use validator::Validate;

use crate::hierarchy::{NewQuiz, QuizChanges};

/// New quiz; questions may be raw tagged objects
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    pub topic: Uuid,
    #[serde(default)]
    pub questions: Vec<QuestionSource>,
}

impl From<CreateQuizRequest> for NewQuiz {
    fn from(request: CreateQuizRequest) -> Self {
        Self {
            name: request.name,
            topic: request.topic,
            questions: request.questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateQuizResponse {
    pub quiz: Quiz,
    pub user: User,
}

/// Quiz editor save: replaces name and every question
#[derive(Debug, Deserialize, Validate)]
pub struct SaveQuizRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[serde(default)]
    pub questions: Vec<QuestionSource>,
}

impl From<SaveQuizRequest> for QuizChanges {
    fn from(request: SaveQuizRequest) -> Self {
        Self {
            name: request.name,
            questions: request.questions,
        }
    }
}

/// Answers in question order; `null` for skipped questions
#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub responses: Vec<Option<Response>>,
}
