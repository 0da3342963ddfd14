use serde::{Deserialize, Serialize};

use crate::{FillInQuestion, MultipleChoiceQuestion, Question};

/// A quiz taker's answer to one question
///
/// JSON integers are choice indices, strings are typed answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Choice(usize),
    Text(String),
}

/// Outcome of grading a full quiz attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub total: usize,
    pub correct: usize,
    /// One entry per question, in quiz order
    pub results: Vec<bool>,
}

impl FillInQuestion {
    pub fn is_correct(&self, response: &str) -> bool {
        let response = response.trim();
        let ignore_case = self.ignore_case.unwrap_or(false);

        std::iter::once(&self.answer)
            .chain(&self.alternative_answers)
            .map(|candidate| candidate.trim())
            .any(|candidate| {
                if ignore_case {
                    candidate.to_lowercase() == response.to_lowercase()
                } else {
                    candidate == response
                }
            })
    }
}

impl MultipleChoiceQuestion {
    pub const fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_answer_index
    }
}

impl Question {
    /// Check a response; a response of the wrong kind is never correct.
    pub fn is_correct(&self, response: &Response) -> bool {
        match (self, response) {
            (Self::FillIn(q), Response::Text(text)) => q.is_correct(text),
            (Self::MultipleChoice(q), Response::Choice(choice)) => q.is_correct(*choice),
            _ => false,
        }
    }
}

/// Grade `responses` against `questions` position by position.
///
/// Missing responses (`None`, or fewer responses than questions) count as wrong;
/// extra responses are ignored.
pub fn grade(questions: &[Question], responses: &[Option<Response>]) -> GradeReport {
    let results: Vec<bool> = questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            responses
                .get(i)
                .and_then(Option::as_ref)
                .is_some_and(|response| question.is_correct(response))
        })
        .collect();

    GradeReport {
        total: questions.len(),
        correct: results.iter().filter(|ok| **ok).count(),
        results,
    }
}
