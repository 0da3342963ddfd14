use std::{fmt, sync::Arc};

use futures::future::{BoxFuture, FutureExt, try_join_all};
use swot_db::{
    DocumentStore, StoreError,
    models::{Quiz, QuizUpdate, Topic, TopicUpdate, User, UserUpdate},
};
use swot_question::{Question, build_all};
use uuid::Uuid;

use super::{
    error::{HierarchyError, OwnershipContext},
    import::{ImportParent, ImportQueue, ImportStep, ImportSummary, TopicTree},
    model::{HierarchyNode, NewQuiz, NewTopic, QuizChanges, required_name},
    tree,
};

/// Name of the topic every new user starts with
pub const DEFAULT_TOPIC_NAME: &str = "General";

/// Topic/quiz operations over a [`DocumentStore`]
///
/// Holds no state of its own; every call re-reads what it needs. Writes that touch
/// more than one document (a topic and its parent, a quiz and its author) are
/// separate atomic updates with no rollback, so a failure part way through
/// propagates and leaves the earlier writes in place.
#[derive(Clone)]
pub struct HierarchyService {
    store: Arc<dyn DocumentStore>,
}

impl fmt::Debug for HierarchyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HierarchyService").finish_non_exhaustive()
    }
}

impl HierarchyService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub async fn find_user(&self, id: Uuid) -> Result<Option<User>, HierarchyError> {
        Ok(self.store.find_user(id).await?)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, HierarchyError> {
        Ok(self.store.find_user_by_email(email.trim()).await?)
    }

    /// Register a user together with their default root topic.
    ///
    /// Emails are unique; registering a known email fails with
    /// [`HierarchyError::EmailTaken`].
    pub async fn create_user(&self, email: &str) -> Result<User, HierarchyError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(HierarchyError::MissingEmail);
        }
        if self.store.find_user_by_email(email).await?.is_some() {
            return Err(HierarchyError::EmailTaken);
        }

        let user = User::new(email);
        self.store.insert_user(&user).await?;
        tracing::info!(user_id = %user.id, "Created user");

        let (_, user) = self
            .create_topic(NewTopic::root(DEFAULT_TOPIC_NAME), &user)
            .await?;
        Ok(user)
    }

    /// Create a topic owned by `user`, either top level or under an owned parent.
    ///
    /// Returns the topic and the user as it is after the write.
    pub async fn create_topic(
        &self,
        data: NewTopic,
        user: &User,
    ) -> Result<(Topic, User), HierarchyError> {
        let name = required_name(&data.name)?;

        // Validate the parent before writing anything
        let parent = match data.parent {
            Some(parent_id) => {
                let parent = self
                    .store
                    .find_topic(parent_id)
                    .await?
                    .ok_or(HierarchyError::ParentNotFound(parent_id))?;
                if parent.created_by != user.id {
                    return Err(HierarchyError::NotOwnedByUser(OwnershipContext::Subtopic));
                }
                Some(parent)
            }
            None => None,
        };

        let topic = Topic::new(name, user.id, parent.as_ref().map(|p| p.id));
        self.store.insert_topic(&topic).await?;

        let user = match parent {
            Some(parent) => {
                self.store
                    .update_topic(parent.id, TopicUpdate::AddSubtopic(topic.id))
                    .await?;
                user.clone()
            }
            None => {
                self.store
                    .update_user(user.id, UserUpdate::AddTopic(topic.id))
                    .await?
            }
        };

        tracing::debug!(topic_id = %topic.id, parent = ?topic.parent, "Created topic");
        metrics::counter!("hierarchy_topics_created_total").increment(1);

        Ok((topic, user))
    }

    /// Create a quiz in a topic owned by `user`.
    ///
    /// Raw tagged questions are converted before the topic is even looked up, so an
    /// invalid question never leaves a partial quiz behind.
    pub async fn create_quiz(
        &self,
        data: NewQuiz,
        user: &User,
    ) -> Result<(Quiz, User), HierarchyError> {
        let name = required_name(&data.name)?;
        let questions = build_all(data.questions)?;
        self.file_quiz(name, data.topic, questions, user).await
    }

    async fn file_quiz(
        &self,
        name: String,
        topic_id: Uuid,
        questions: Vec<Question>,
        user: &User,
    ) -> Result<(Quiz, User), HierarchyError> {
        let topic = self
            .store
            .find_topic(topic_id)
            .await?
            .ok_or(HierarchyError::TopicNotFound(topic_id))?;
        if topic.created_by != user.id {
            return Err(HierarchyError::NotOwnedByUser(OwnershipContext::Quiz));
        }

        let quiz = Quiz::new(name, topic.id, user.id, questions);
        self.store.insert_quiz(&quiz).await?;
        let user = self
            .store
            .update_user(user.id, UserUpdate::AddQuiz(quiz.id))
            .await?;

        tracing::debug!(quiz_id = %quiz.id, topic_id = %topic.id, "Created quiz");
        metrics::counter!("hierarchy_quizzes_created_total").increment(1);

        Ok((quiz, user))
    }

    /// The full hierarchy of `user`, roots in `user.topics` order.
    pub async fn get_quizzes_and_topics(
        &self,
        user: &User,
    ) -> Result<Vec<HierarchyNode>, HierarchyError> {
        Ok(tree::load_user_hierarchy(self.store(), user).await?)
    }

    pub async fn get_quizzes_and_subtopics(
        &self,
        topic: Topic,
    ) -> Result<HierarchyNode, HierarchyError> {
        Ok(tree::load_subtree(self.store(), topic).await?)
    }

    pub async fn find_topic(&self, id: Uuid) -> Result<Option<Topic>, HierarchyError> {
        Ok(self.store.find_topic(id).await?)
    }

    /// Look up a topic and check that `user` owns it.
    pub async fn owned_topic(&self, id: Uuid, user: &User) -> Result<Topic, HierarchyError> {
        let topic = self
            .store
            .find_topic(id)
            .await?
            .ok_or(HierarchyError::TopicNotFound(id))?;
        if topic.created_by != user.id {
            return Err(HierarchyError::NotOwnedByUser(OwnershipContext::Topic));
        }
        Ok(topic)
    }

    pub async fn rename_topic(
        &self,
        id: Uuid,
        name: &str,
        user: &User,
    ) -> Result<Topic, HierarchyError> {
        let name = required_name(name)?;
        let topic = self.owned_topic(id, user).await?;
        Ok(self
            .store
            .update_topic(topic.id, TopicUpdate::Rename(name))
            .await?)
    }

    /// Look up a quiz, with its questions, and check that `user` owns it.
    pub async fn get_quiz(&self, id: Uuid, user: &User) -> Result<Quiz, HierarchyError> {
        let quiz = self
            .store
            .find_quiz(id)
            .await?
            .ok_or(HierarchyError::QuizNotFound(id))?;
        if quiz.created_by != user.id {
            return Err(HierarchyError::NotOwnedByUser(OwnershipContext::ExistingQuiz));
        }
        Ok(quiz)
    }

    /// Replace the name and questions of an owned quiz.
    pub async fn update_quiz(
        &self,
        id: Uuid,
        changes: QuizChanges,
        user: &User,
    ) -> Result<Quiz, HierarchyError> {
        let name = required_name(&changes.name)?;
        let questions = build_all(changes.questions)?;
        let quiz = self.get_quiz(id, user).await?;

        Ok(self
            .store
            .update_quiz(quiz.id, QuizUpdate::Replace { name, questions })
            .await?)
    }

    /// Delete a quiz and drop it from its author's quiz list.
    pub async fn delete_quiz(&self, quiz: &Quiz) -> Result<Quiz, HierarchyError> {
        self.remove_quiz(quiz.id, quiz.created_by).await
    }

    async fn remove_quiz(&self, id: Uuid, author: Uuid) -> Result<Quiz, HierarchyError> {
        let deleted = self.store.delete_quiz(id).await?;
        self.store
            .update_user(author, UserUpdate::PullQuiz(id))
            .await?;

        tracing::debug!(quiz_id = %id, "Deleted quiz");
        metrics::counter!("hierarchy_quizzes_deleted_total").increment(1);
        Ok(deleted)
    }

    /// Delete `topic` with every quiz and descendant topic under it.
    ///
    /// The subtree is re-read from the store first. Children are fully deleted
    /// before their parent; siblings run concurrently. Returns the topic as it was
    /// before the delete.
    pub async fn delete_topic(&self, topic: &Topic) -> Result<Topic, HierarchyError> {
        let snapshot = self
            .store
            .find_topic(topic.id)
            .await?
            .ok_or(HierarchyError::TopicNotFound(topic.id))?;

        let subtree = self.get_quizzes_and_subtopics(snapshot.clone()).await?;
        self.delete_node(&subtree).await?;

        tracing::info!(
            topic_id = %snapshot.id,
            topics = subtree.topic_count(),
            quizzes = subtree.quiz_count(),
            "Deleted topic subtree"
        );
        Ok(snapshot)
    }

    fn delete_node<'a>(&'a self, node: &'a HierarchyNode) -> BoxFuture<'a, Result<(), HierarchyError>> {
        async move {
            let quizzes = node
                .quizzes
                .iter()
                .map(|quiz| self.remove_quiz(quiz.id, quiz.created_by));
            let children = node.subtopics.iter().map(|child| self.delete_node(child));
            futures::try_join!(try_join_all(quizzes), try_join_all(children))?;

            self.store.delete_topic(node.id).await?;
            self.unlink_topic(node).await?;

            metrics::counter!("hierarchy_topics_deleted_total").increment(1);
            Ok(())
        }
        .boxed()
    }

    /// Drop a deleted topic from its parent's subtopics, or from its owner's
    /// topics when it was a root.
    async fn unlink_topic(&self, node: &HierarchyNode) -> Result<(), HierarchyError> {
        match node.parent {
            Some(parent) => {
                match self
                    .store
                    .update_topic(parent, TopicUpdate::PullSubtopic(node.id))
                    .await
                {
                    Ok(_) => {}
                    Err(StoreError::NotFound { .. }) => {
                        tracing::warn!(
                            topic_id = %node.id,
                            parent_id = %parent,
                            "Parent of deleted topic could not be found in topics collection"
                        );
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            None => {
                self.store
                    .update_user(node.created_by, UserUpdate::PullTopic(node.id))
                    .await?;
            }
        }
        Ok(())
    }

    /// Create every topic and quiz of `topics`, under `root` or at the top level.
    ///
    /// The whole tree is validated first. Creation then runs one step at a time,
    /// each step seeing the user document left by the previous one.
    pub async fn import_topic_tree(
        &self,
        mut user: User,
        topics: Vec<TopicTree>,
        root: Option<&Topic>,
    ) -> Result<ImportSummary, HierarchyError> {
        let mut queue = ImportQueue::compile(topics)?;

        if let Some(root) = root
            && root.created_by != user.id
        {
            return Err(HierarchyError::NotOwnedByUser(OwnershipContext::Subtopic));
        }

        tracing::debug!(user_id = %user.id, steps = queue.len(), "Importing topic tree");

        // Ids of created topics, indexed by slot
        let mut slots: Vec<Uuid> = Vec::with_capacity(queue.topic_slots());
        let mut summary = ImportSummary::default();

        while let Some(step) = queue.pop() {
            match step {
                ImportStep::CreateTopic { slot, parent, name } => {
                    let parent = match parent {
                        ImportParent::Root => root.map(|topic| topic.id),
                        ImportParent::Slot(parent_slot) => Some(slots[parent_slot]),
                    };
                    let (topic, updated) = self.create_topic(NewTopic { name, parent }, &user).await?;
                    debug_assert_eq!(slot, slots.len());
                    slots.push(topic.id);
                    user = updated;
                    summary.topics_created += 1;
                }
                ImportStep::CreateQuiz {
                    topic,
                    name,
                    questions,
                } => {
                    let (_, updated) = self.file_quiz(name, slots[topic], questions, &user).await?;
                    user = updated;
                    summary.quizzes_created += 1;
                }
            }
        }

        tracing::info!(
            user_id = %user.id,
            topics = summary.topics_created,
            quizzes = summary.quizzes_created,
            "Imported topic tree"
        );
        Ok(summary)
    }

    /// Delete `user` with every topic and quiz they own.
    pub async fn delete_user(&self, user: &User) -> Result<User, HierarchyError> {
        for topic_id in &user.topics {
            match self.store.find_topic(*topic_id).await? {
                Some(topic) => {
                    self.delete_topic(&topic).await?;
                }
                None => {
                    tracing::warn!(topic_id = %topic_id, user_id = %user.id, "Skipping missing topic while deleting user");
                }
            }
        }

        // Quizzes not reachable through any topic
        let remaining = self
            .store
            .find_user(user.id)
            .await?
            .map(|user| user.quizzes)
            .unwrap_or_default();
        for quiz_id in remaining {
            if self.store.find_quiz(quiz_id).await?.is_some() {
                self.remove_quiz(quiz_id, user.id).await?;
            }
        }

        let deleted = self.store.delete_user(user.id).await?;
        tracing::info!(user_id = %deleted.id, "Deleted user");
        Ok(deleted)
    }
}
