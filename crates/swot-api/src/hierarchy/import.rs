//! Topic tree import.
//!
//! An import is compiled into an [`ImportQueue`] before anything is written. Every
//! step that creates a topic or quiz also mutates the importing user's document,
//! so the queue is drained strictly in order by [`HierarchyService`].
//!
//! [`HierarchyService`]: super::HierarchyService

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use swot_question::{Question, QuestionSource, build_all};

use super::{error::HierarchyError, model::required_name};

/// One node of an imported topic tree
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopicTree {
    pub name: String,
    #[serde(default)]
    pub quizzes: Vec<QuizTree>,
    #[serde(default)]
    pub subtopics: Vec<TopicTree>,
}

impl TopicTree {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quizzes: Vec::new(),
            subtopics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_quiz(mut self, quiz: QuizTree) -> Self {
        self.quizzes.push(quiz);
        self
    }

    #[must_use]
    pub fn with_subtopic(mut self, subtopic: Self) -> Self {
        self.subtopics.push(subtopic);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizTree {
    pub name: String,
    #[serde(default)]
    pub questions: Vec<QuestionSource>,
}

impl QuizTree {
    pub fn new<Q>(name: impl Into<String>, questions: impl IntoIterator<Item = Q>) -> Self
    where
        Q: Into<QuestionSource>,
    {
        Self {
            name: name.into(),
            questions: questions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Where a created topic is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportParent {
    /// The topic the import runs under, or top level when there is none
    Root,
    /// A topic created earlier by the same queue
    Slot(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportStep {
    /// Create a topic and remember it under `slot`
    CreateTopic {
        slot: usize,
        parent: ImportParent,
        name: String,
    },
    /// Create a quiz in the topic stored under slot `topic`
    CreateQuiz {
        topic: usize,
        name: String,
        questions: Vec<Question>,
    },
}

/// Ordered creation steps of one import
///
/// Steps are in pre-order: a topic, then its quizzes in order, then each of its
/// subtopic trees. A `CreateQuiz` or child `CreateTopic` always comes after the
/// `CreateTopic` of the slot it refers to.
#[derive(Debug, Clone, Default)]
pub struct ImportQueue {
    steps: VecDeque<ImportStep>,
    topic_slots: usize,
}

impl ImportQueue {
    /// Validate `topics` and flatten them into steps.
    ///
    /// Fails on the first blank name or invalid question.
    pub fn compile(topics: Vec<TopicTree>) -> Result<Self, HierarchyError> {
        let mut queue = Self::default();
        for topic in topics {
            queue.push_topic(topic, ImportParent::Root)?;
        }
        Ok(queue)
    }

    fn push_topic(&mut self, topic: TopicTree, parent: ImportParent) -> Result<(), HierarchyError> {
        let name = required_name(&topic.name)?;
        let slot = self.topic_slots;
        self.topic_slots += 1;
        self.steps
            .push_back(ImportStep::CreateTopic { slot, parent, name });

        for quiz in topic.quizzes {
            let name = required_name(&quiz.name)?;
            let questions = build_all(quiz.questions)?;
            self.steps.push_back(ImportStep::CreateQuiz {
                topic: slot,
                name,
                questions,
            });
        }

        for subtopic in topic.subtopics {
            self.push_topic(subtopic, ImportParent::Slot(slot))?;
        }
        Ok(())
    }

    pub fn pop(&mut self) -> Option<ImportStep> {
        self.steps.pop_front()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> impl Iterator<Item = &ImportStep> {
        self.steps.iter()
    }

    /// Number of topics the queue creates
    pub const fn topic_slots(&self) -> usize {
        self.topic_slots
    }
}

/// Counts reported back after an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub topics_created: usize,
    pub quizzes_created: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use swot_question::QuestionError;

    fn fill_in(answer: &str) -> serde_json::Value {
        json!({
            "type": "FillInQuestion",
            "questionHtml": "<p>?</p>",
            "answer": answer,
            "alternativeAnswers": []
        })
    }

    fn describe(step: &ImportStep) -> String {
        match step {
            ImportStep::CreateTopic { slot, parent, name } => {
                format!("topic {slot} {name} under {parent:?}")
            }
            ImportStep::CreateQuiz {
                topic,
                name,
                questions,
            } => format!("quiz {name} in {topic} ({})", questions.len()),
        }
    }

    #[test]
    fn test_steps_are_pre_order() {
        let tree = vec![
            TopicTree::new("Flying")
                .with_quiz(QuizTree::new("Night Flying", [fill_in("a"), fill_in("b")]))
                .with_quiz(QuizTree::new("Weather", Vec::<QuestionSource>::new()))
                .with_subtopic(TopicTree::new("Regulations").with_subtopic(TopicTree::new("FAR")))
                .with_subtopic(TopicTree::new("Navigation")),
            TopicTree::new("Sailing"),
        ];

        let queue = ImportQueue::compile(tree).unwrap();
        let steps: Vec<String> = queue.steps().map(describe).collect();

        assert_eq!(
            steps,
            [
                "topic 0 Flying under Root",
                "quiz Night Flying in 0 (2)",
                "quiz Weather in 0 (0)",
                "topic 1 Regulations under Slot(0)",
                "topic 2 FAR under Slot(1)",
                "topic 3 Navigation under Slot(0)",
                "topic 4 Sailing under Root",
            ]
        );
        assert_eq!(queue.topic_slots(), 5);
        assert_eq!(queue.len(), 7);
    }

    #[test]
    fn test_pop_drains_in_order() {
        let mut queue = ImportQueue::compile(vec![TopicTree::new("A"), TopicTree::new("B")]).unwrap();

        let first = queue.pop().unwrap();
        assert!(matches!(first, ImportStep::CreateTopic { slot: 0, ref name, .. } if name == "A"));
        let second = queue.pop().unwrap();
        assert!(matches!(second, ImportStep::CreateTopic { slot: 1, ref name, .. } if name == "B"));
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_invalid_question_fails_compile() {
        let tree = vec![TopicTree::new("Broken").with_quiz(QuizTree::new(
            "Bad",
            [json!({ "type": "BadQuestionType" })],
        ))];

        let err = ImportQueue::compile(tree).unwrap_err();
        assert!(matches!(
            err,
            HierarchyError::InvalidQuestion(QuestionError::InvalidQuestionType(ref tag)) if tag == "BadQuestionType"
        ));
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let err = ImportQueue::compile(vec![TopicTree::new("  ")]).unwrap_err();
        assert!(matches!(err, HierarchyError::MissingName));

        let err = ImportQueue::compile(vec![
            TopicTree::new("Fine").with_quiz(QuizTree::new("", Vec::<QuestionSource>::new())),
        ])
        .unwrap_err();
        assert!(matches!(err, HierarchyError::MissingName));
    }

    #[test]
    fn test_deserializes_optional_children() {
        let tree: Vec<TopicTree> = serde_json::from_value(json!([
            { "name": "Flying", "quizzes": [{ "name": "Night Flying" }] },
            { "name": "Sailing", "subtopics": [{ "name": "Knots" }] }
        ]))
        .unwrap();

        assert!(tree[0].subtopics.is_empty());
        assert!(tree[0].quizzes[0].questions.is_empty());
        assert_eq!(tree[1].subtopics[0].name, "Knots");
    }
}
