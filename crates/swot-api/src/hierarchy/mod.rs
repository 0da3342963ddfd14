//! Topic/quiz hierarchy: the recursive tree operations over the document store.

pub mod error;
pub mod import;
pub mod model;
pub mod search;
pub mod service;
pub mod tree;

pub use error::{HierarchyError, OwnershipContext};
pub use import::{ImportParent, ImportQueue, ImportStep, ImportSummary, QuizTree, TopicTree};
pub use model::{HierarchyNode, NewQuiz, NewTopic, QuizChanges, QuizSummary};
pub use search::search_hierarchy_by_name;
pub use service::HierarchyService;
