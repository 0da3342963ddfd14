use swot_db::StoreError;
use swot_question::QuestionError;
use thiserror::Error;
use uuid::Uuid;

/// What the caller was doing when an ownership check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipContext {
    /// Creating a quiz under a topic
    Quiz,
    /// Creating a subtopic under a parent
    Subtopic,
    /// Reading, renaming or deleting a topic
    Topic,
    /// Reading, saving, grading or deleting a quiz
    ExistingQuiz,
}

impl OwnershipContext {
    const fn message(self) -> &'static str {
        match self {
            Self::Quiz => "Failed to create quiz: topic is not owned by user.",
            Self::Subtopic => "Failed to create subtopic: parent topic not owned by user.",
            Self::Topic => "Topic is not owned by user.",
            Self::ExistingQuiz => "Quiz is not owned by user.",
        }
    }
}

#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),
    #[error("A name is required.")]
    MissingName,
    #[error("An email is required.")]
    MissingEmail,
    #[error("An account with this email already exists.")]
    EmailTaken,
    #[error("Topic not found.")]
    TopicNotFound(Uuid),
    #[error("Parent topic not found.")]
    ParentNotFound(Uuid),
    #[error("Quiz not found.")]
    QuizNotFound(Uuid),
    #[error("{}", .0.message())]
    NotOwnedByUser(OwnershipContext),
    #[error(transparent)]
    Store(#[from] StoreError),
}
