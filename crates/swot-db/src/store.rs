//! Document store abstraction.
//!
//! Three collections (users, topics, quizzes), each with find-by-id, find-by-parent,
//! create, single-document atomic update and delete-by-id. Lookups return `None` or an
//! empty list; updates and deletes of a missing id fail with [`StoreError::NotFound`].

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Quiz, QuizUpdate, Topic, TopicUpdate, User, UserUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Topics,
    Quizzes,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Users => "users",
            Self::Topics => "topics",
            Self::Quizzes => "quizzes",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document {id} not found in {collection}")]
    NotFound { collection: Collection, id: Uuid },
    #[error("Document {id} already exists in {collection}")]
    AlreadyExists { collection: Collection, id: Uuid },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub const fn not_found(collection: Collection, id: Uuid) -> Self {
        Self::NotFound { collection, id }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::AlreadyExists`] when the id or the email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    /// Apply `update` atomically and return the updated document.
    async fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<User, StoreError>;

    /// Remove the user and return its last state.
    async fn delete_user(&self, id: Uuid) -> Result<User, StoreError>;

    async fn find_topic(&self, id: Uuid) -> Result<Option<Topic>, StoreError>;

    /// Topics whose `parent` is `parent`, in insertion order.
    async fn find_subtopics(&self, parent: Uuid) -> Result<Vec<Topic>, StoreError>;

    async fn insert_topic(&self, topic: &Topic) -> Result<(), StoreError>;

    async fn update_topic(&self, id: Uuid, update: TopicUpdate) -> Result<Topic, StoreError>;

    async fn delete_topic(&self, id: Uuid) -> Result<Topic, StoreError>;

    async fn find_quiz(&self, id: Uuid) -> Result<Option<Quiz>, StoreError>;

    /// Quizzes filed under `topic`, in insertion order.
    async fn find_quizzes_by_topic(&self, topic: Uuid) -> Result<Vec<Quiz>, StoreError>;

    async fn insert_quiz(&self, quiz: &Quiz) -> Result<(), StoreError>;

    async fn update_quiz(&self, id: Uuid, update: QuizUpdate) -> Result<Quiz, StoreError>;

    async fn delete_quiz(&self, id: Uuid) -> Result<Quiz, StoreError>;
}
