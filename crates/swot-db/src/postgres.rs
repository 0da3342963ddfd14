//! Postgres-backed [`DocumentStore`].

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::{Quiz, QuizUpdate, Topic, TopicUpdate, User, UserUpdate},
    repositories::{quiz, topic, user},
    store::{Collection, DocumentStore, StoreError},
};

/// Postgres error code for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn found<T>(row: Option<T>, collection: Collection, id: Uuid) -> Result<T, StoreError> {
    row.ok_or(StoreError::not_found(collection, id))
}

fn insert_error(err: sqlx::Error, collection: Collection, id: Uuid) -> StoreError {
    let conflict = matches!(
        &err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION)
    );
    if conflict {
        StoreError::AlreadyExists { collection, id }
    } else {
        StoreError::Database(err)
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(user::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(user::find_by_email(&self.pool, email).await?)
    }

    async fn insert_user(&self, doc: &User) -> Result<(), StoreError> {
        user::insert(&self.pool, doc)
            .await
            .map_err(|e| insert_error(e, Collection::Users, doc.id))
    }

    async fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<User, StoreError> {
        let row = match update {
            UserUpdate::AddTopic(topic_id) => user::add_topic(&self.pool, id, topic_id).await?,
            UserUpdate::PullTopic(topic_id) => user::pull_topic(&self.pool, id, topic_id).await?,
            UserUpdate::AddQuiz(quiz_id) => user::add_quiz(&self.pool, id, quiz_id).await?,
            UserUpdate::PullQuiz(quiz_id) => user::pull_quiz(&self.pool, id, quiz_id).await?,
        };
        found(row, Collection::Users, id)
    }

    async fn delete_user(&self, id: Uuid) -> Result<User, StoreError> {
        found(user::delete(&self.pool, id).await?, Collection::Users, id)
    }

    async fn find_topic(&self, id: Uuid) -> Result<Option<Topic>, StoreError> {
        Ok(topic::find_by_id(&self.pool, id).await?)
    }

    async fn find_subtopics(&self, parent: Uuid) -> Result<Vec<Topic>, StoreError> {
        Ok(topic::find_by_parent(&self.pool, parent).await?)
    }

    async fn insert_topic(&self, doc: &Topic) -> Result<(), StoreError> {
        topic::insert(&self.pool, doc)
            .await
            .map_err(|e| insert_error(e, Collection::Topics, doc.id))
    }

    async fn update_topic(&self, id: Uuid, update: TopicUpdate) -> Result<Topic, StoreError> {
        let row = match update {
            TopicUpdate::Rename(name) => topic::rename(&self.pool, id, &name).await?,
            TopicUpdate::AddSubtopic(child) => topic::add_subtopic(&self.pool, id, child).await?,
            TopicUpdate::PullSubtopic(child) => {
                topic::pull_subtopic(&self.pool, id, child).await?
            }
        };
        found(row, Collection::Topics, id)
    }

    async fn delete_topic(&self, id: Uuid) -> Result<Topic, StoreError> {
        found(topic::delete(&self.pool, id).await?, Collection::Topics, id)
    }

    async fn find_quiz(&self, id: Uuid) -> Result<Option<Quiz>, StoreError> {
        Ok(quiz::find_by_id(&self.pool, id).await?)
    }

    async fn find_quizzes_by_topic(&self, topic_id: Uuid) -> Result<Vec<Quiz>, StoreError> {
        Ok(quiz::find_by_topic(&self.pool, topic_id).await?)
    }

    async fn insert_quiz(&self, doc: &Quiz) -> Result<(), StoreError> {
        quiz::insert(&self.pool, doc)
            .await
            .map_err(|e| insert_error(e, Collection::Quizzes, doc.id))
    }

    async fn update_quiz(&self, id: Uuid, update: QuizUpdate) -> Result<Quiz, StoreError> {
        let row = match update {
            QuizUpdate::Replace { name, questions } => {
                quiz::replace(&self.pool, id, &name, &questions).await?
            }
        };
        found(row, Collection::Quizzes, id)
    }

    async fn delete_quiz(&self, id: Uuid) -> Result<Quiz, StoreError> {
        found(quiz::delete(&self.pool, id).await?, Collection::Quizzes, id)
    }
}
