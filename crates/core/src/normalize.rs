//! Normalization of questions and answers between their stored shapes.
//!
//! Earlier versions of the app stored `questions` and `answers` either as
//! JSON-encoded strings or as structured JSON, and some storefront scripts
//! submitted answers as an object map instead of `{questionId, value}`
//! pairs. Everything new is written in the canonical structured shape; the
//! functions here let readers accept the older shapes.
//!
//! The `normalize_*` functions are lenient and never fail: if a string does
//! not parse, the original value is returned unchanged. The `decode_*`
//! functions produce typed values and report failures, and the
//! `*_from_stored` variants swallow failures so a corrupt row cannot break a
//! listing.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::form::{Answer, AnswerValue, Question};

/// Parse a JSON-encoded string, or return the value as is.
fn parse_if_string(raw: Value) -> Value {
    match raw {
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(parsed) => parsed,
            Err(_) => Value::String(s),
        },
        other => other,
    }
}

/// Turn a string-encoded question list into structured JSON.
pub fn normalize_questions(raw: Value) -> Value {
    parse_if_string(raw)
}

/// Turn string-encoded or map-shaped answers into a `[{questionId, value}]`
/// array.
///
/// An object map `{ "q1": "Ada" }` becomes `[{"questionId": "q1", "value":
/// "Ada"}]` in key order. Anything else that is not an array is returned
/// unchanged.
pub fn normalize_answers(raw: Value) -> Value {
    match parse_if_string(raw) {
        Value::Object(map) if !is_answer_object(&map) => Value::Array(
            map.into_iter()
                .map(|(key, value)| {
                    let mut pair = Map::new();
                    pair.insert("questionId".to_string(), Value::String(key));
                    pair.insert("value".to_string(), value);
                    Value::Object(pair)
                })
                .collect(),
        ),
        Value::Object(map) => Value::Array(vec![Value::Object(map)]),
        other => other,
    }
}

/// A lone `{questionId, value}` object rather than a map of answers.
fn is_answer_object(map: &Map<String, Value>) -> bool {
    map.len() == 2 && map.contains_key("questionId") && map.contains_key("value")
}

/// Decode questions strictly into the canonical typed form.
pub fn decode_questions(raw: Value) -> Result<Vec<Question>, CoreError> {
    match normalize_questions(raw) {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<Question>(item).map_err(|e| {
                    CoreError::InvalidPayload(format!("Invalid question at position {}: {e}", index + 1))
                })
            })
            .collect(),
        _ => Err(CoreError::InvalidPayload(
            "questions must be a list".to_string(),
        )),
    }
}

/// Decode stored questions, yielding an empty list for unreadable data.
pub fn questions_from_stored(raw: Value) -> Vec<Question> {
    decode_questions(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Stored questions could not be decoded");
        Vec::new()
    })
}

/// Coerce one answer value into an [`AnswerValue`].
///
/// Scalars become text; arrays of scalars become a list. Nested objects are
/// not answers.
fn coerce_value(value: Value) -> Option<AnswerValue> {
    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => Some(String::new()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    match value {
        Value::Array(items) => items
            .into_iter()
            .map(scalar)
            .collect::<Option<Vec<_>>>()
            .map(AnswerValue::Multiple),
        other => scalar(other).map(AnswerValue::Text),
    }
}

/// Decode answers strictly into `{questionId, value}` pairs.
pub fn decode_answers(raw: Value) -> Result<Vec<Answer>, CoreError> {
    let Value::Array(items) = normalize_answers(raw) else {
        return Err(CoreError::InvalidPayload(
            "answers must be a list of {questionId, value} pairs".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let invalid = || CoreError::InvalidPayload(format!("Invalid answer at position {}", index + 1));
            let Value::Object(mut obj) = item else {
                return Err(invalid());
            };
            let question_id = match obj.remove("questionId") {
                Some(Value::String(id)) if !id.trim().is_empty() => id,
                _ => return Err(invalid()),
            };
            let value = coerce_value(obj.remove("value").unwrap_or(Value::Null)).ok_or_else(invalid)?;
            Ok(Answer { question_id, value })
        })
        .collect()
}

/// Decode stored answers, yielding an empty list for unreadable data.
pub fn answers_from_stored(raw: Value) -> Vec<Answer> {
    decode_answers(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Stored answers could not be decoded");
        Vec::new()
    })
}
