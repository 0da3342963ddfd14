use serde::{Deserialize, Serialize};
use swot_db::models::{Topic, User};
use uuid::Uuid;
use validator::Validate;

use crate::hierarchy::{NewTopic, TopicTree};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTopicRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[serde(default)]
    pub parent: Option<Uuid>,
}

impl From<CreateTopicRequest> for NewTopic {
    fn from(request: CreateTopicRequest) -> Self {
        Self {
            name: request.name,
            parent: request.parent,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateTopicResponse {
    pub topic: Topic,
    pub user: User,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RenameTopicRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// Topic trees to create, optionally under an existing topic
///
/// Names and questions inside `topics` are checked when the import is compiled.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub parent: Option<Uuid>,
    pub topics: Vec<TopicTree>,
}
