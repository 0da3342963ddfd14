use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use swot_db::StoreError;
use thiserror::Error;

use crate::hierarchy::HierarchyError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Hierarchy(HierarchyError::Store(err))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Jwt(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Hierarchy(err) => hierarchy_status(err),
        }
    }
}

fn hierarchy_status(err: &HierarchyError) -> StatusCode {
    match err {
        HierarchyError::InvalidQuestion(_)
        | HierarchyError::MissingName
        | HierarchyError::MissingEmail => StatusCode::BAD_REQUEST,
        HierarchyError::TopicNotFound(_)
        | HierarchyError::ParentNotFound(_)
        | HierarchyError::QuizNotFound(_)
        | HierarchyError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
        HierarchyError::NotOwnedByUser(_) => StatusCode::FORBIDDEN,
        HierarchyError::EmailTaken
        | HierarchyError::Store(StoreError::AlreadyExists { .. }) => StatusCode::CONFLICT,
        HierarchyError::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Never leak internals to the client
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
