//! Editor model for composing a form before it is saved.
//!
//! [`FormDraft`] holds the in-progress question list and settings and
//! exposes the operations the admin builder offers. Every operation that
//! names a question id is a no-op when the id is unknown.

use serde_json::Value;
use uuid::Uuid;

use crate::error::CoreError;
use crate::form::{Form, FormPayload, FormStatus, Question, QuestionType};
use crate::validation::{validate_form_payload, ValidatedForm};

/// Prefix for generated question ids.
pub const QUESTION_ID_PREFIX: &str = "q_";

/// Options seeded on a new question.
pub const DEFAULT_OPTIONS: [&str; 2] = ["Option 1", "Option 2"];

/// Direction for [`FormDraft::move_question`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Generate a fresh question id.
pub fn new_question_id() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("{QUESTION_ID_PREFIX}{}", &simple[..12])
}

/// A blank short-answer question as the builder adds it.
///
/// Options are pre-filled so switching the type to a choice question
/// immediately shows something to edit.
pub fn empty_question(id: impl Into<String>) -> Question {
    Question {
        id: id.into(),
        question_type: QuestionType::Short,
        text: String::new(),
        placeholder: Some(String::new()),
        options: DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect(),
        required: false,
        visible: true,
    }
}

/// A form being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
    /// Set when editing a saved form; upserts then update instead of create.
    pub id: Option<String>,
    pub title: String,
    pub questions: Vec<Question>,
    pub settings: Value,
    pub status: FormStatus,
}

impl FormDraft {
    pub fn new() -> Self {
        Self {
            settings: Value::Object(Default::default()),
            ..Self::default()
        }
    }

    /// Start editing a saved form.
    pub fn from_form(form: &Form) -> Self {
        Self {
            id: Some(form.id.to_string()),
            title: form.title.clone(),
            questions: form.questions.clone(),
            settings: form.settings.clone(),
            status: form.status,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    /// Append a blank question and return its id.
    pub fn add_question(&mut self) -> String {
        let id = new_question_id();
        self.questions.push(empty_question(id.clone()));
        id
    }

    pub fn remove_question(&mut self, id: &str) {
        self.questions.retain(|q| q.id != id);
    }

    /// Copy a question, insert the copy right after it, and return the new id.
    pub fn duplicate_question(&mut self, id: &str) -> Option<String> {
        let index = self.position(id)?;
        let mut copy = self.questions[index].clone();
        copy.id = new_question_id();
        let new_id = copy.id.clone();
        self.questions.insert(index + 1, copy);
        Some(new_id)
    }

    /// Apply an edit to one question. The question keeps its id.
    pub fn update_question(&mut self, id: &str, edit: impl FnOnce(&mut Question)) {
        if let Some(index) = self.position(id) {
            let question = &mut self.questions[index];
            edit(question);
            question.id = id.to_string();
        }
    }

    /// Swap a question with its neighbour. No-op at either end of the list.
    pub fn move_question(&mut self, id: &str, direction: MoveDirection) {
        let Some(index) = self.position(id) else {
            return;
        };
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.questions.len() => index + 1,
            _ => return,
        };
        self.questions.swap(index, target);
    }

    pub fn toggle_visible(&mut self, id: &str) {
        self.update_question(id, |q| q.visible = !q.visible);
    }

    /// Append `Option N` where N is the new option count.
    pub fn add_option(&mut self, id: &str) {
        self.update_question(id, |q| {
            let label = format!("Option {}", q.options.len() + 1);
            q.options.push(label);
        });
    }

    pub fn remove_option(&mut self, id: &str, index: usize) {
        self.update_question(id, |q| {
            if index < q.options.len() {
                q.options.remove(index);
            }
        });
    }

    /// Clear title and questions, keeping the draft's identity and settings.
    pub fn reset(&mut self) {
        self.title.clear();
        self.questions.clear();
    }

    /// The upsert payload the editor sends.
    pub fn to_payload(&self) -> FormPayload {
        FormPayload {
            id: self.id.clone(),
            title: Some(self.title.clone()),
            questions: serde_json::to_value(&self.questions).ok(),
            settings: Some(self.settings.clone()),
            status: Some(self.status),
            shop: None,
        }
    }

    /// Validate the draft as the server would before saving it.
    pub fn validate(&self) -> Result<ValidatedForm, CoreError> {
        validate_form_payload(self.to_payload())
    }
}
