use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swot_db::models::{Quiz, Topic};
use swot_question::QuestionSource;
use uuid::Uuid;

use super::error::HierarchyError;

/// Quiz as listed in the hierarchy: everything but the question bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub topic: Uuid,
    pub created_by: Uuid,
    pub date_created: DateTime<Utc>,
    pub num_questions: usize,
}

impl From<Quiz> for QuizSummary {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            name: quiz.name,
            topic: quiz.topic,
            created_by: quiz.created_by,
            date_created: quiz.date_created,
            num_questions: quiz.questions.len(),
        }
    }
}

/// Materialized topic with its quizzes and subtopics attached
///
/// Built fresh on every read and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub parent: Option<Uuid>,
    pub date_created: DateTime<Utc>,
    pub quizzes: Vec<QuizSummary>,
    pub subtopics: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn new(topic: Topic, quizzes: Vec<QuizSummary>, subtopics: Vec<Self>) -> Self {
        Self {
            id: topic.id,
            name: topic.name,
            created_by: topic.created_by,
            parent: topic.parent,
            date_created: topic.date_created,
            quizzes,
            subtopics,
        }
    }

    /// Number of topics in this subtree, including this one
    pub fn topic_count(&self) -> usize {
        1 + self.subtopics.iter().map(Self::topic_count).sum::<usize>()
    }

    /// Number of quizzes anywhere in this subtree
    pub fn quiz_count(&self) -> usize {
        self.quizzes.len() + self.subtopics.iter().map(Self::quiz_count).sum::<usize>()
    }
}

/// Input of `create_topic`
///
/// Only `name` and `parent` are read; `createdBy` and `dateCreated` in incoming JSON
/// are dropped because the service always sets them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTopic {
    pub name: String,
    #[serde(default)]
    pub parent: Option<Uuid>,
}

impl NewTopic {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    pub fn under(name: impl Into<String>, parent: &Topic) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.id),
        }
    }
}

/// Input of `create_quiz`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewQuiz {
    pub name: String,
    pub topic: Uuid,
    #[serde(default)]
    pub questions: Vec<QuestionSource>,
}

impl NewQuiz {
    pub fn new(name: impl Into<String>, topic: &Topic) -> Self {
        Self {
            name: name.into(),
            topic: topic.id,
            questions: Vec::new(),
        }
    }

    pub fn with_questions<Q>(mut self, questions: impl IntoIterator<Item = Q>) -> Self
    where
        Q: Into<QuestionSource>,
    {
        self.questions = questions.into_iter().map(Into::into).collect();
        self
    }
}

/// Replacement name and questions for an existing quiz
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizChanges {
    pub name: String,
    #[serde(default)]
    pub questions: Vec<QuestionSource>,
}

/// `name` exactly as given, or [`HierarchyError::MissingName`] when it is blank
pub(crate) fn required_name(name: &str) -> Result<String, HierarchyError> {
    if name.trim().is_empty() {
        return Err(HierarchyError::MissingName);
    }
    Ok(name.to_owned())
}
