//! Form payload validation.
//!
//! [`validate_form_payload`] is the gate every create/upsert passes through
//! before persistence. It returns the decoded, canonical form document so
//! callers never touch the raw payload again.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::CoreError;
use crate::form::{FormPayload, FormStatus, Question};
use crate::normalize::decode_questions;
use crate::settings::validate_settings;

/* --------------------------------------------------------------------------
   Limits
   -------------------------------------------------------------------------- */

/// Maximum length of a form title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum number of questions in one form.
pub const MAX_QUESTIONS: usize = 100;

/// Maximum number of options on a choice question.
pub const MAX_OPTIONS: usize = 50;

/// Error message for a payload without a title or questions.
pub const MISSING_TITLE_OR_QUESTIONS: &str = "Missing title or questions";

/// A form document that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub title: String,
    pub questions: Vec<Question>,
    pub settings: Value,
    /// `None` when the payload omitted it: new forms start active and
    /// updates keep their stored status.
    pub status: Option<FormStatus>,
}

/// Validate an editor payload.
///
/// Fails with [`CoreError::InvalidPayload`] when:
/// - `title` is missing or blank, or `questions` is missing or empty;
/// - a question entry cannot be decoded;
/// - question ids are blank or repeated;
/// - a choice question has no options;
/// - settings are not an object or carry malformed recognized keys.
pub fn validate_form_payload(payload: FormPayload) -> Result<ValidatedForm, CoreError> {
    let title = payload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CoreError::InvalidPayload(MISSING_TITLE_OR_QUESTIONS.to_string()))?
        .to_string();

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::InvalidPayload(format!(
            "Title too long (max {MAX_TITLE_LEN} characters)"
        )));
    }

    let raw_questions = payload
        .questions
        .filter(|q| !q.is_null())
        .ok_or_else(|| CoreError::InvalidPayload(MISSING_TITLE_OR_QUESTIONS.to_string()))?;
    let questions = decode_questions(raw_questions)?;
    if questions.is_empty() {
        return Err(CoreError::InvalidPayload(
            MISSING_TITLE_OR_QUESTIONS.to_string(),
        ));
    }
    validate_questions(&questions)?;

    let settings = match payload.settings {
        None | Some(Value::Null) => Value::Object(Default::default()),
        Some(settings) => {
            validate_settings(&settings)?;
            settings
        }
    };

    Ok(ValidatedForm {
        title,
        questions,
        settings,
        status: payload.status,
    })
}

/// Check the shape of each question and the uniqueness of their ids.
pub fn validate_questions(questions: &[Question]) -> Result<(), CoreError> {
    if questions.len() > MAX_QUESTIONS {
        return Err(CoreError::InvalidPayload(format!(
            "Too many questions (max {MAX_QUESTIONS})"
        )));
    }

    let mut seen = HashSet::with_capacity(questions.len());
    for (index, question) in questions.iter().enumerate() {
        let position = index + 1;
        if question.id.trim().is_empty() {
            return Err(CoreError::InvalidPayload(format!(
                "Question at position {position} has no id"
            )));
        }
        if !seen.insert(question.id.as_str()) {
            return Err(CoreError::InvalidPayload(format!(
                "Duplicate question id '{}'",
                question.id
            )));
        }
        if question.question_type.is_choice() {
            if question.options.iter().all(|o| o.trim().is_empty()) {
                return Err(CoreError::InvalidPayload(format!(
                    "Question '{}' needs at least one option",
                    question.label()
                )));
            }
            if question.options.len() > MAX_OPTIONS {
                return Err(CoreError::InvalidPayload(format!(
                    "Question '{}' has too many options (max {MAX_OPTIONS})",
                    question.label()
                )));
            }
        }
    }
    Ok(())
}
