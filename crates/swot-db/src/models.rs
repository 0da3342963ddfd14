use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swot_question::Question;
use uuid::Uuid;

/// User model - owns root topics and authored quizzes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// User email
    pub email: String,
    /// Root topic ids, ordered and unique
    pub topics: Vec<Uuid>,
    /// Ids of quizzes authored by this user
    pub quizzes: Vec<Uuid>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            topics: Vec::new(),
            quizzes: Vec::new(),
        }
    }
}

/// Topic model - a node of the user's topic tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Unique topic identifier
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Topic name
    pub name: String,
    /// Owning user
    pub created_by: Uuid,
    /// Parent topic, `None` for root topics
    pub parent: Option<Uuid>,
    /// Child topic ids, ordered
    pub subtopics: Vec<Uuid>,
    /// When the topic was created
    pub date_created: DateTime<Utc>,
}

impl Topic {
    pub fn new(name: impl Into<String>, created_by: Uuid, parent: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_by,
            parent,
            subtopics: Vec::new(),
            date_created: Utc::now(),
        }
    }

    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Quiz model - an ordered list of questions filed under a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Unique quiz identifier
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Quiz name
    pub name: String,
    /// Topic the quiz belongs to
    pub topic: Uuid,
    /// Owning user
    pub created_by: Uuid,
    /// Questions, in display order (stored as JSONB)
    #[sqlx(json)]
    pub questions: Vec<Question>,
    /// When the quiz was created
    pub date_created: DateTime<Utc>,
}

impl Quiz {
    pub fn new(
        name: impl Into<String>,
        topic: Uuid,
        created_by: Uuid,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            topic,
            created_by,
            questions,
            date_created: Utc::now(),
        }
    }
}

/// Atomic single-document update of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserUpdate {
    AddTopic(Uuid),
    PullTopic(Uuid),
    AddQuiz(Uuid),
    PullQuiz(Uuid),
}

impl UserUpdate {
    pub fn apply(self, user: &mut User) {
        match self {
            Self::AddTopic(id) => add_to_set(&mut user.topics, id),
            Self::PullTopic(id) => pull(&mut user.topics, id),
            Self::AddQuiz(id) => add_to_set(&mut user.quizzes, id),
            Self::PullQuiz(id) => pull(&mut user.quizzes, id),
        }
    }
}

/// Atomic single-document update of a topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicUpdate {
    Rename(String),
    AddSubtopic(Uuid),
    PullSubtopic(Uuid),
}

impl TopicUpdate {
    pub fn apply(self, topic: &mut Topic) {
        match self {
            Self::Rename(name) => topic.name = name,
            Self::AddSubtopic(id) => add_to_set(&mut topic.subtopics, id),
            Self::PullSubtopic(id) => pull(&mut topic.subtopics, id),
        }
    }
}

/// Atomic single-document update of a quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizUpdate {
    Replace {
        name: String,
        questions: Vec<Question>,
    },
}

impl QuizUpdate {
    pub fn apply(self, quiz: &mut Quiz) {
        match self {
            Self::Replace { name, questions } => {
                quiz.name = name;
                quiz.questions = questions;
            }
        }
    }
}

/// Append `id` unless already present
fn add_to_set(ids: &mut Vec<Uuid>, id: Uuid) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

/// Remove every occurrence of `id`
fn pull(ids: &mut Vec<Uuid>, id: Uuid) {
    ids.retain(|existing| *existing != id);
}
