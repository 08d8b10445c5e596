//! Validation of an untyped question bank into a [`QuestionPool`].

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{OPTION_COUNT, Question, QuestionError, QuestionPool, TextError};

/// Rule a question-bank record broke.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationRule {
    MalformedJson(String),
    NotAnArray { found: &'static str },
    NotAnObject { found: &'static str },
    Missing,
    NotAString { found: &'static str },
    Empty,
    WrongOptionCount { found: usize },
    NotAnInteger,
    OutOfRange,
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson(reason) => write!(f, "is not valid JSON ({reason})"),
            Self::NotAnArray { found } => write!(f, "must be an array, found {found}"),
            Self::NotAnObject { found } => write!(f, "must be an object, found {found}"),
            Self::Missing => f.write_str("is required"),
            Self::NotAString { found } => write!(f, "must be a string, found {found}"),
            Self::Empty => f.write_str("must not be empty"),
            Self::WrongOptionCount { found } => {
                write!(f, "must have exactly {OPTION_COUNT} options, found {found}")
            }
            Self::NotAnInteger => f.write_str("must be an integer"),
            Self::OutOfRange => write!(f, "must be between 0 and {}", OPTION_COUNT - 1),
        }
    }
}

/// A question bank failed validation. Nothing from it is kept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}{path} {rule}", record_prefix(.record))]
pub struct ValidationError {
    /// Position of the offending record, `None` for whole-document failures.
    pub record: Option<usize>,
    /// Slash-separated location inside the document, e.g. `/3/options/1`.
    pub path: String,
    pub rule: ValidationRule,
}

fn record_prefix(record: &Option<usize>) -> String {
    record.map_or_else(|| "questions: ".to_string(), |i| format!("question {i}: "))
}

impl ValidationError {
    fn document(rule: ValidationRule) -> Self {
        Self {
            record: None,
            path: "/".into(),
            rule,
        }
    }

    fn field(record: usize, field: &str, rule: ValidationRule) -> Self {
        Self {
            record: Some(record),
            path: format!("/{record}/{field}"),
            rule,
        }
    }
}

/// Parse JSON text and validate it.
///
/// # Errors
///
/// Returns `ValidationError` with `ValidationRule::MalformedJson` for unparsable
/// input, otherwise whatever [`validate`] reports.
pub fn validate_str(raw: &str) -> Result<QuestionPool, ValidationError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| ValidationError::document(ValidationRule::MalformedJson(e.to_string())))?;
    validate(&value)
}

/// Validate a question bank and build the pool.
///
/// The whole input is rejected on the first invalid record. An empty array
/// yields an empty pool.
///
/// # Errors
///
/// Returns `ValidationError` naming the record, field and broken rule.
pub fn validate(raw: &Value) -> Result<QuestionPool, ValidationError> {
    let records = raw.as_array().ok_or_else(|| {
        ValidationError::document(ValidationRule::NotAnArray {
            found: kind(raw),
        })
    })?;

    let questions = records
        .iter()
        .enumerate()
        .map(|(index, record)| validate_record(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuestionPool::new(questions))
}

fn validate_record(index: usize, record: &Value) -> Result<Question, ValidationError> {
    let object = record.as_object().ok_or_else(|| ValidationError {
        record: Some(index),
        path: format!("/{index}"),
        rule: ValidationRule::NotAnObject {
            found: kind(record),
        },
    })?;

    let text = required_text(index, object, "question")?;
    let section = required_text(index, object, "section")?;
    let options = required_options(index, object)?;
    let correct = required_index(index, object)?;

    Question::new(text, section, options, correct).map_err(|e| question_error(index, e))
}

/// Locate a constructor failure at the field it concerns.
fn question_error(index: usize, error: QuestionError) -> ValidationError {
    let text_rule = |e: TextError| match e {
        TextError::Empty => ValidationRule::Empty,
    };
    match error {
        QuestionError::Text(e) => ValidationError::field(index, "question", text_rule(e)),
        QuestionError::Section(e) => ValidationError::field(index, "section", text_rule(e)),
        QuestionError::OptionCount { found } => ValidationError::field(
            index,
            "options",
            ValidationRule::WrongOptionCount { found },
        ),
        QuestionError::Option { position, source } => {
            ValidationError::field(index, &format!("options/{position}"), text_rule(source))
        }
        QuestionError::CorrectIndex { .. } => {
            ValidationError::field(index, "answer", ValidationRule::OutOfRange)
        }
    }
}

fn required<'a>(
    index: usize,
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Value, ValidationError> {
    object
        .get(field)
        .ok_or_else(|| ValidationError::field(index, field, ValidationRule::Missing))
}

fn required_text(
    index: usize,
    object: &Map<String, Value>,
    field: &str,
) -> Result<String, ValidationError> {
    let value = required(index, object, field)?;
    let text = value.as_str().ok_or_else(|| {
        ValidationError::field(index, field, ValidationRule::NotAString { found: kind(value) })
    })?;
    if text.is_empty() {
        return Err(ValidationError::field(index, field, ValidationRule::Empty));
    }
    Ok(text.to_owned())
}

fn required_options(
    index: usize,
    object: &Map<String, Value>,
) -> Result<Vec<String>, ValidationError> {
    let value = required(index, object, "options")?;
    let entries = value.as_array().ok_or_else(|| {
        ValidationError::field(
            index,
            "options",
            ValidationRule::NotAnArray { found: kind(value) },
        )
    })?;
    if entries.len() != OPTION_COUNT {
        return Err(ValidationError::field(
            index,
            "options",
            ValidationRule::WrongOptionCount {
                found: entries.len(),
            },
        ));
    }

    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let field = format!("options/{position}");
            let text = entry.as_str().ok_or_else(|| {
                ValidationError::field(
                    index,
                    &field,
                    ValidationRule::NotAString { found: kind(entry) },
                )
            })?;
            if text.is_empty() {
                return Err(ValidationError::field(index, &field, ValidationRule::Empty));
            }
            Ok(text.to_owned())
        })
        .collect()
}

fn required_index(index: usize, object: &Map<String, Value>) -> Result<usize, ValidationError> {
    let value = required(index, object, "answer")?;
    let not_integer = || ValidationError::field(index, "answer", ValidationRule::NotAnInteger);
    let out_of_range = || ValidationError::field(index, "answer", ValidationRule::OutOfRange);

    let Value::Number(number) = value else {
        return Err(not_integer());
    };
    if let Some(n) = number.as_u64() {
        return usize::try_from(n)
            .ok()
            .filter(|n| *n < OPTION_COUNT)
            .ok_or_else(out_of_range);
    }
    if number.is_i64() {
        // Negative integers.
        return Err(out_of_range());
    }

    // JSON numbers such as `2.0` are integral.
    let n = number.as_f64().ok_or_else(not_integer)?;
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(not_integer());
    }
    if n < 0.0 || n >= OPTION_COUNT as f64 {
        return Err(out_of_range());
    }
    Ok(n as usize)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
