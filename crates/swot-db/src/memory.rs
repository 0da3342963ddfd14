//! In-memory [`DocumentStore`], used by tests and by the server when no database
//! is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::{Quiz, QuizUpdate, Topic, TopicUpdate, User, UserUpdate},
    store::{Collection, DocumentStore, StoreError},
};

/// Collections kept in insertion order, which is what `find_subtopics` and
/// `find_quizzes_by_topic` report.
#[derive(Debug, Default)]
struct Documents {
    users: Vec<User>,
    topics: Vec<Topic>,
    quizzes: Vec<Quiz>,
}

/// Every operation takes the lock once, so each update is atomic per document.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Documents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.documents.read().await.users.len()
    }

    pub async fn topic_count(&self) -> usize {
        self.documents.read().await.topics.len()
    }

    pub async fn quiz_count(&self) -> usize {
        self.documents.read().await.quizzes.len()
    }
}

trait Document: Clone {
    const COLLECTION: Collection;

    fn id(&self) -> Uuid;
}

impl Document for User {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for Topic {
    const COLLECTION: Collection = Collection::Topics;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for Quiz {
    const COLLECTION: Collection = Collection::Quizzes;

    fn id(&self) -> Uuid {
        self.id
    }
}

fn find<T: Document>(docs: &[T], id: Uuid) -> Option<T> {
    docs.iter().find(|doc| doc.id() == id).cloned()
}

fn insert<T: Document>(docs: &mut Vec<T>, doc: &T) -> Result<(), StoreError> {
    if docs.iter().any(|existing| existing.id() == doc.id()) {
        return Err(StoreError::AlreadyExists {
            collection: T::COLLECTION,
            id: doc.id(),
        });
    }
    docs.push(doc.clone());
    Ok(())
}

fn update<T: Document>(
    docs: &mut [T],
    id: Uuid,
    apply: impl FnOnce(&mut T),
) -> Result<T, StoreError> {
    let doc = docs
        .iter_mut()
        .find(|doc| doc.id() == id)
        .ok_or(StoreError::not_found(T::COLLECTION, id))?;
    apply(doc);
    Ok(doc.clone())
}

fn remove<T: Document>(docs: &mut Vec<T>, id: Uuid) -> Result<T, StoreError> {
    let index = docs
        .iter()
        .position(|doc| doc.id() == id)
        .ok_or(StoreError::not_found(T::COLLECTION, id))?;
    Ok(docs.remove(index))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(find(&self.documents.read().await.users, id))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.users.iter().find(|user| user.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        // Emails are unique, like the index on the users table
        if documents.users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::AlreadyExists {
                collection: Collection::Users,
                id: user.id,
            });
        }
        insert(&mut documents.users, user)
    }

    async fn update_user(&self, id: Uuid, change: UserUpdate) -> Result<User, StoreError> {
        update(&mut self.documents.write().await.users, id, |user| {
            change.apply(user)
        })
    }

    async fn delete_user(&self, id: Uuid) -> Result<User, StoreError> {
        remove(&mut self.documents.write().await.users, id)
    }

    async fn find_topic(&self, id: Uuid) -> Result<Option<Topic>, StoreError> {
        Ok(find(&self.documents.read().await.topics, id))
    }

    async fn find_subtopics(&self, parent: Uuid) -> Result<Vec<Topic>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .topics
            .iter()
            .filter(|topic| topic.parent == Some(parent))
            .cloned()
            .collect())
    }

    async fn insert_topic(&self, topic: &Topic) -> Result<(), StoreError> {
        insert(&mut self.documents.write().await.topics, topic)
    }

    async fn update_topic(&self, id: Uuid, change: TopicUpdate) -> Result<Topic, StoreError> {
        update(&mut self.documents.write().await.topics, id, |topic| {
            change.apply(topic)
        })
    }

    async fn delete_topic(&self, id: Uuid) -> Result<Topic, StoreError> {
        remove(&mut self.documents.write().await.topics, id)
    }

    async fn find_quiz(&self, id: Uuid) -> Result<Option<Quiz>, StoreError> {
        Ok(find(&self.documents.read().await.quizzes, id))
    }

    async fn find_quizzes_by_topic(&self, topic: Uuid) -> Result<Vec<Quiz>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .quizzes
            .iter()
            .filter(|quiz| quiz.topic == topic)
            .cloned()
            .collect())
    }

    async fn insert_quiz(&self, quiz: &Quiz) -> Result<(), StoreError> {
        insert(&mut self.documents.write().await.quizzes, quiz)
    }

    async fn update_quiz(&self, id: Uuid, change: QuizUpdate) -> Result<Quiz, StoreError> {
        update(&mut self.documents.write().await.quizzes, id, |quiz| {
            change.apply(quiz)
        })
    }

    async fn delete_quiz(&self, id: Uuid) -> Result<Quiz, StoreError> {
        remove(&mut self.documents.write().await.quizzes, id)
    }
}
