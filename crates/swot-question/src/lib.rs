//! Question model for swot quizzes
//!
//! A quiz is an ordered list of [`Question`] values. Questions travel over the wire as
//! tagged objects (`{"type": "FillInQuestion", ...}`) and are turned into the closed
//! [`Question`] enum by [`Question::create`], which rejects unknown tags.

mod grading;

pub use grading::{GradeReport, Response, grade};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Wire tag of [`FillInQuestion`]
pub const FILL_IN_TAG: &str = "FillInQuestion";
/// Wire tag of [`MultipleChoiceQuestion`]
pub const MULTIPLE_CHOICE_TAG: &str = "MultipleChoiceQuestion";

#[derive(Error, Debug)]
pub enum QuestionError {
    #[error("Invalid question type: '{0}'")]
    InvalidQuestionType(String),
    #[error("Malformed question: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Multiple choice questions need at least 2 choices, got {0}")]
    TooFewChoices(usize),
    #[error("Correct answer index {index} is out of range for {choices} choices")]
    AnswerIndexOutOfRange { index: usize, choices: usize },
}

/// Free-text question answered by typing the answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillInQuestion {
    pub question_html: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_case: Option<bool>,
    #[serde(default)]
    pub alternative_answers: Vec<String>,
}

/// Question answered by picking one of several choices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceQuestion {
    pub question_html: String,
    pub choices: Vec<String>,
    pub correct_answer_index: usize,
}

impl MultipleChoiceQuestion {
    fn validate(&self) -> Result<(), QuestionError> {
        if self.choices.len() < 2 {
            return Err(QuestionError::TooFewChoices(self.choices.len()));
        }
        if self.correct_answer_index >= self.choices.len() {
            return Err(QuestionError::AnswerIndexOutOfRange {
                index: self.correct_answer_index,
                choices: self.choices.len(),
            });
        }
        Ok(())
    }
}

/// A single quiz question
///
/// Serializes to the tagged wire shape. Deserializing through serde trusts the
/// payload (it is used for documents already in the store); untrusted input should
/// go through [`Question::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    #[serde(rename = "FillInQuestion")]
    FillIn(FillInQuestion),
    #[serde(rename = "MultipleChoiceQuestion")]
    MultipleChoice(MultipleChoiceQuestion),
}

impl Question {
    /// Build a question from a tagged plain object.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use swot_question::Question;
    ///
    /// let question = Question::create(json!({
    ///     "type": "MultipleChoiceQuestion",
    ///     "questionHtml": "<p>What is the capital of North Dakota?</p>",
    ///     "choices": ["Pierre", "Bismarck", "Des Moines", "Helena"],
    ///     "correctAnswerIndex": 1
    /// }))
    /// .unwrap();
    /// assert_eq!(question.tag(), "MultipleChoiceQuestion");
    ///
    /// assert!(Question::create(json!({ "type": "BadQuestionType" })).is_err());
    /// ```
    pub fn create(data: Value) -> Result<Self, QuestionError> {
        let mut fields = match data {
            Value::Object(fields) => fields,
            other => {
                return Err(QuestionError::Malformed(serde::de::Error::custom(format!(
                    "expected a tagged object, got {other}"
                ))));
            }
        };

        let tag = match fields.remove("type") {
            Some(Value::String(tag)) => tag,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        Self::from_tag(&tag, fields)
    }

    /// Construct the variant named by `tag` from the remaining fields.
    pub fn from_tag(tag: &str, fields: Map<String, Value>) -> Result<Self, QuestionError> {
        match tag {
            FILL_IN_TAG => {
                let question: FillInQuestion = serde_json::from_value(Value::Object(fields))?;
                Ok(Self::FillIn(question))
            }
            MULTIPLE_CHOICE_TAG => {
                let question: MultipleChoiceQuestion =
                    serde_json::from_value(Value::Object(fields))?;
                question.validate()?;
                Ok(Self::MultipleChoice(question))
            }
            other => Err(QuestionError::InvalidQuestionType(other.to_string())),
        }
    }

    /// Wire tag of this variant
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::FillIn(_) => FILL_IN_TAG,
            Self::MultipleChoice(_) => MULTIPLE_CHOICE_TAG,
        }
    }

    pub fn question_html(&self) -> &str {
        match self {
            Self::FillIn(q) => &q.question_html,
            Self::MultipleChoice(q) => &q.question_html,
        }
    }
}

impl From<FillInQuestion> for Question {
    fn from(question: FillInQuestion) -> Self {
        Self::FillIn(question)
    }
}

impl From<MultipleChoiceQuestion> for Question {
    fn from(question: MultipleChoiceQuestion) -> Self {
        Self::MultipleChoice(question)
    }
}

/// Question input that is either already built or still a raw tagged object
///
/// Anything arriving over JSON is `Tagged`; Rust callers can hand over built
/// questions directly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum QuestionSource {
    Built(Question),
    Tagged(Value),
}

impl QuestionSource {
    pub fn into_question(self) -> Result<Question, QuestionError> {
        match self {
            Self::Built(question) => Ok(question),
            Self::Tagged(data) => Question::create(data),
        }
    }
}

impl From<Value> for QuestionSource {
    fn from(data: Value) -> Self {
        Self::Tagged(data)
    }
}

impl From<Question> for QuestionSource {
    fn from(question: Question) -> Self {
        Self::Built(question)
    }
}

/// Convert every source, failing on the first invalid one.
pub fn build_all(sources: Vec<QuestionSource>) -> Result<Vec<Question>, QuestionError> {
    sources.into_iter().map(QuestionSource::into_question).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cones() -> Value {
        json!({
            "type": "FillInQuestion",
            "questionHtml": "What is the name of the photoreceptors in the retina of the eye that allow for color as well as detail vision?",
            "answer": "cones",
            "alternativeAnswers": ["cone"]
        })
    }

    fn north_dakota() -> Value {
        json!({
            "type": "MultipleChoiceQuestion",
            "questionHtml": "<p>What is the capital of North Dakota?</p>",
            "choices": ["Pierre", "Bismarck", "Des Moines", "Helena"],
            "correctAnswerIndex": 1
        })
    }

    #[test]
    fn test_create_fill_in() {
        let question = Question::create(cones()).unwrap();
        let Question::FillIn(fill_in) = &question else {
            panic!("expected a fill-in question, got {question:?}");
        };
        assert_eq!(fill_in.answer, "cones");
        assert_eq!(fill_in.alternative_answers, vec!["cone".to_string()]);
        assert_eq!(fill_in.ignore_case, None);
    }

    #[test]
    fn test_create_multiple_choice() {
        let question = Question::create(north_dakota()).unwrap();
        let Question::MultipleChoice(mc) = &question else {
            panic!("expected a multiple choice question, got {question:?}");
        };
        assert_eq!(mc.correct_answer_index, 1);
        assert_eq!(mc.choices.len(), 4);
    }

    #[test]
    fn test_create_preserves_fields() {
        // Serializing back must give exactly what was passed in
        for data in [cones(), north_dakota()] {
            let question = Question::create(data.clone()).unwrap();
            assert_eq!(serde_json::to_value(&question).unwrap(), data);
        }

        let with_ignore_case = json!({
            "type": "FillInQuestion",
            "questionHtml": "What is this illusion called?",
            "answer": "Coriolis Illusion",
            "ignoreCase": true,
            "alternativeAnswers": ["coriolis", "the coriolis illusion"]
        });
        let question = Question::create(with_ignore_case.clone()).unwrap();
        assert_eq!(serde_json::to_value(&question).unwrap(), with_ignore_case);
    }

    #[test]
    fn test_create_rejects_unknown_type() {
        let err = Question::create(json!({ "type": "BadQuestionType", "foo": "bar" })).unwrap_err();
        assert!(matches!(err, QuestionError::InvalidQuestionType(ref t) if t == "BadQuestionType"));
        assert!(err.to_string().contains("Invalid question type"));

        let err = Question::create(json!({ "questionHtml": "untagged" })).unwrap_err();
        assert!(matches!(err, QuestionError::InvalidQuestionType(_)));
    }

    #[test]
    fn test_create_rejects_malformed() {
        let err = Question::create(json!({ "type": "FillInQuestion", "questionHtml": "no answer" }))
            .unwrap_err();
        assert!(matches!(err, QuestionError::Malformed(_)));

        let err = Question::create(json!("FillInQuestion")).unwrap_err();
        assert!(matches!(err, QuestionError::Malformed(_)));
    }

    #[test]
    fn test_multiple_choice_constraints() {
        let err = Question::create(json!({
            "type": "MultipleChoiceQuestion",
            "questionHtml": "Only one?",
            "choices": ["yes"],
            "correctAnswerIndex": 0
        }))
        .unwrap_err();
        assert!(matches!(err, QuestionError::TooFewChoices(1)));

        let err = Question::create(json!({
            "type": "MultipleChoiceQuestion",
            "questionHtml": "Out of range",
            "choices": ["a", "b"],
            "correctAnswerIndex": 2
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            QuestionError::AnswerIndexOutOfRange { index: 2, choices: 2 }
        ));
    }

    #[test]
    fn test_question_source() {
        let built = Question::create(cones()).unwrap();
        let sources: Vec<QuestionSource> =
            vec![built.clone().into(), north_dakota().into()];
        let questions = build_all(sources).unwrap();
        assert_eq!(questions[0], built);
        assert_eq!(questions[1].tag(), MULTIPLE_CHOICE_TAG);

        let sources: Vec<QuestionSource> =
            serde_json::from_value(json!([cones(), { "type": "Essay" }])).unwrap();
        assert!(matches!(
            build_all(sources),
            Err(QuestionError::InvalidQuestionType(_))
        ));
    }
}
