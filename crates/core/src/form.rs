//! Form schema and submission contract.
//!
//! These types are the single source of truth for the JSON exchanged between
//! the admin editor, the persistence layer, the public endpoints and the
//! storefront renderer. TypeScript bindings are generated with `ts-rs` so the
//! browser side cannot drift from the server.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// Field type of a [`Question`].
///
/// `Select` (dropdown) and `Multiple` (radio group) are two presentations of
/// the same single-choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum QuestionType {
    Short,
    Paragraph,
    Select,
    Multiple,
    Checkboxes,
    Email,
    Number,
}

impl QuestionType {
    /// Whether the question draws its answer from `options`.
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            QuestionType::Select | QuestionType::Multiple | QuestionType::Checkboxes
        )
    }

    /// Whether the answer is a sequence of strings rather than one string.
    pub fn is_multi_valued(self) -> bool {
        self == QuestionType::Checkboxes
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Short => "short",
            QuestionType::Paragraph => "paragraph",
            QuestionType::Select => "select",
            QuestionType::Multiple => "multiple",
            QuestionType::Checkboxes => "checkboxes",
            QuestionType::Email => "email",
            QuestionType::Number => "number",
        }
    }
}

fn default_visible() -> bool {
    true
}

/// One field definition within a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    /// Unique within the owning form and stable across edits; the answer key.
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    /// Hidden questions stay in the schema but are neither rendered nor
    /// required.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Question {
    /// Build a visible, optional question with no options.
    pub fn new(id: impl Into<String>, question_type: QuestionType, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question_type,
            text: text.into(),
            placeholder: None,
            options: Vec::new(),
            required: false,
            visible: true,
        }
    }

    /// Label used in user-facing messages; falls back to the id.
    pub fn label(&self) -> &str {
        if self.text.trim().is_empty() {
            &self.id
        } else {
            &self.text
        }
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Publication status of a form. Only `Active` forms are served publicly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FormStatus {
    #[default]
    Active,
    Inactive,
}

impl FormStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FormStatus::Active => "Active",
            FormStatus::Inactive => "Inactive",
        }
    }
}

/// A persisted, merchant-authored form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Form {
    pub id: DbId,
    /// Owning storefront domain. Set from the session at creation only.
    pub shop: String,
    pub title: String,
    pub questions: Vec<Question>,
    /// Presentation settings; see [`crate::settings::ResolvedSettings`] for
    /// the recognized keys.
    pub settings: serde_json::Value,
    pub status: FormStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Form {
    /// Questions shown to respondents, in schema order.
    pub fn visible_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.visible)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Whether the public endpoint may serve this form.
    ///
    /// The form must be active and, when the caller names a shop, owned by
    /// exactly that shop.
    pub fn is_public_for(&self, shop: Option<&str>) -> bool {
        if self.status != FormStatus::Active {
            return false;
        }
        match shop {
            Some(shop) => self.shop == shop,
            None => true,
        }
    }
}

/// Full-document upsert payload sent by the admin editor.
///
/// `questions` is kept as raw JSON because older clients send it
/// JSON-encoded as a string; [`crate::validation::validate_form_payload`]
/// normalizes and decodes it.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Option<serde_json::Value>,
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
    #[serde(default)]
    pub status: Option<FormStatus>,
    /// Accepted for compatibility and ignored; the shop always comes from
    /// the session.
    #[serde(default)]
    pub shop: Option<String>,
}

// ---------------------------------------------------------------------------
// Answers and responses
// ---------------------------------------------------------------------------

/// Value of one answer: a string for single-valued questions, a sequence
/// for checkboxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AnswerValue {
    Text(String),
    Multiple(Vec<String>),
}

impl AnswerValue {
    /// Blank strings and empty sequences count as no answer.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Multiple(values) => values.iter().all(|v| v.trim().is_empty()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            AnswerValue::Multiple(_) => None,
        }
    }
}

/// One `{questionId, value}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Answer {
    pub question_id: String,
    pub value: AnswerValue,
}

impl Answer {
    pub fn text(question_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            value: AnswerValue::Text(value.into()),
        }
    }

    pub fn multiple<I, S>(question_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id: question_id.into(),
            value: AnswerValue::Multiple(values.into_iter().map(Into::into).collect()),
        }
    }
}

/// A visitor's submission against one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormResponse {
    pub id: DbId,
    pub form_id: DbId,
    pub answers: Vec<Answer>,
    pub created_at: Timestamp,
}

/// A response as listed in the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResponseListItem {
    pub id: DbId,
    pub form_id: DbId,
    pub form_title: String,
    pub answers: Vec<Answer>,
    /// First non-empty answer to an `email` question, if any.
    pub email: Option<String>,
    pub created_at: Timestamp,
}

/// Pick the respondent's email out of a set of answers.
///
/// Prefers answers to `email` questions; falls back to answers keyed
/// `email`/`Email`, which is how legacy label-keyed submissions stored it.
pub fn find_email(questions: &[Question], answers: &[Answer]) -> Option<String> {
    let by_type = answers.iter().find(|a| {
        questions
            .iter()
            .any(|q| q.id == a.question_id && q.question_type == QuestionType::Email)
            && !a.value.is_empty()
    });
    let by_key = || {
        answers
            .iter()
            .find(|a| a.question_id.eq_ignore_ascii_case("email") && !a.value.is_empty())
    };

    by_type
        .or_else(by_key)
        .and_then(|a| a.value.as_text())
        .map(|s| s.trim().to_string())
}
