//! Answer collection and submission checks.
//!
//! Answers are keyed by question **id**, never by label, so editing a
//! question's text does not orphan earlier responses. The same checks run in
//! the storefront flow before anything is sent and again on the server.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::form::{Answer, AnswerValue, Form, Question, QuestionType};

/// Loose address check; real validation happens when the merchant replies.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

/// Maximum length of a single text answer, in characters.
pub const MAX_ANSWER_LEN: usize = 10_000;

/// Build answers from submitted form fields (`name=value` pairs).
///
/// Fields are matched by question id. Checkbox questions collect every
/// non-empty value under their id; other questions take the first value.
/// Hidden questions are skipped and every visible question yields an
/// answer, empty if nothing was submitted.
pub fn collect_answers(form: &Form, fields: &[(String, String)]) -> Vec<Answer> {
    form.visible_questions()
        .map(|question| {
            let mut values = fields
                .iter()
                .filter(|(name, _)| *name == question.id)
                .map(|(_, value)| value.clone());

            let value = if question.question_type.is_multi_valued() {
                AnswerValue::Multiple(values.filter(|v| !v.trim().is_empty()).collect())
            } else {
                AnswerValue::Text(values.next().unwrap_or_default())
            };

            Answer {
                question_id: question.id.clone(),
                value,
            }
        })
        .collect()
}

/// Visible required questions that have no non-empty answer.
pub fn missing_required<'a>(questions: &'a [Question], answers: &[Answer]) -> Vec<&'a Question> {
    questions
        .iter()
        .filter(|q| q.visible && q.required)
        .filter(|q| {
            answers
                .iter()
                .find(|a| a.question_id == q.id)
                .map_or(true, |a| a.value.is_empty())
        })
        .collect()
}

/// Validate answers against a form and return them in canonical shape.
///
/// Rejects with [`CoreError::InvalidPayload`] when:
/// - an answer references a question the form does not have or hides;
/// - a question is answered more than once;
/// - a visible required question is unanswered;
/// - a choice answer is not one of the question's options;
/// - an email answer is malformed or a number answer is not finite;
/// - a single-valued question receives a list.
///
/// A checkbox question answered with a single string is accepted as a
/// one-element list.
pub fn validate_submission(form: &Form, answers: Vec<Answer>) -> Result<Vec<Answer>, CoreError> {
    let mut canonical = Vec::with_capacity(answers.len());
    let mut seen = HashSet::with_capacity(answers.len());

    for answer in answers {
        let question = form
            .question(&answer.question_id)
            .filter(|q| q.visible)
            .ok_or_else(|| {
                CoreError::InvalidPayload(format!("Unknown question '{}'", answer.question_id))
            })?;
        if !seen.insert(question.id.as_str()) {
            return Err(CoreError::InvalidPayload(format!(
                "Duplicate answer for '{}'",
                question.label()
            )));
        }
        let value = check_answer(question, answer.value)?;
        canonical.push(Answer {
            question_id: answer.question_id,
            value,
        });
    }

    if let Some(question) = missing_required(&form.questions, &canonical).first() {
        return Err(CoreError::InvalidPayload(format!(
            "Please answer: {}",
            question.label()
        )));
    }

    Ok(canonical)
}

fn check_answer(question: &Question, value: AnswerValue) -> Result<AnswerValue, CoreError> {
    let invalid = |reason: &str| {
        CoreError::InvalidPayload(format!("Invalid answer for '{}': {reason}", question.label()))
    };

    let value = match (question.question_type.is_multi_valued(), value) {
        (true, AnswerValue::Text(s)) if s.trim().is_empty() => AnswerValue::Multiple(Vec::new()),
        (true, AnswerValue::Text(s)) => AnswerValue::Multiple(vec![s]),
        (false, AnswerValue::Multiple(_)) => return Err(invalid("expected a single value")),
        (_, value) => value,
    };

    match &value {
        AnswerValue::Text(text) => {
            if text.chars().count() > MAX_ANSWER_LEN {
                return Err(invalid("answer is too long"));
            }
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(value);
            }
            match question.question_type {
                QuestionType::Select | QuestionType::Multiple
                    if !question.options.iter().any(|o| o == trimmed) =>
                {
                    return Err(invalid("not one of the options"));
                }
                QuestionType::Email if !EMAIL.is_match(trimmed) => {
                    return Err(invalid("not a valid email address"));
                }
                QuestionType::Number if !trimmed.parse::<f64>().is_ok_and(f64::is_finite) => {
                    return Err(invalid("not a number"));
                }
                _ => {}
            }
        }
        AnswerValue::Multiple(values) => {
            if let Some(bad) = values.iter().find(|v| !question.options.contains(*v)) {
                return Err(invalid(&format!("'{bad}' is not one of the options")));
            }
        }
    }

    Ok(value)
}
