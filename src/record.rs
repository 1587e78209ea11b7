//! Deck records as delivered by the generator.
//!
//! Each row of the result file is a JSON array
//! `[tags, flds, sfld, qfmt, afmt]`. Columns are opaque: non-string values
//! are coerced to their JSON text rather than rejected.

use crate::error::BindingError;
use serde_json::Value;

/// Separator between sub-fields of [`Record::raw_fields`] (ASCII unit separator).
pub const FIELD_SEPARATOR: char = '\u{1f}';

const COLUMNS: [&str; 5] = [
    "tags",
    "rawFields",
    "sortField",
    "questionTemplate",
    "answerTemplate",
];

/// One flashcard note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub tags: String,
    /// Sub-fields joined by [`FIELD_SEPARATOR`], in template binding order.
    pub raw_fields: String,
    pub sort_field: String,
    pub question_template: String,
    pub answer_template: String,
}

impl Record {
    pub fn new(raw_fields: &str, question_template: &str, answer_template: &str) -> Self {
        Self {
            tags: String::new(),
            raw_fields: raw_fields.to_owned(),
            sort_field: String::new(),
            question_template: question_template.to_owned(),
            answer_template: answer_template.to_owned(),
        }
    }

    /// Decode one result-file row. Extra trailing columns are ignored.
    pub fn from_value(row: &Value) -> Result<Self, BindingError> {
        let cols = row.as_array().ok_or(BindingError::NotARow)?;

        let col = |i: usize| {
            cols.get(i)
                .map(coerce_text)
                .ok_or(BindingError::MissingColumn {
                    column: COLUMNS[i],
                    found: cols.len(),
                })
        };

        Ok(Self {
            tags: col(0)?,
            raw_fields: col(1)?,
            sort_field: col(2)?,
            question_template: col(3)?,
            answer_template: col(4)?,
        })
    }

    pub fn fields(&self) -> Vec<&str> {
        split_fields(&self.raw_fields)
    }
}

/// Split a raw field string on [`FIELD_SEPARATOR`].
///
/// No trimming, no escaping; an empty input yields one empty field.
pub fn split_fields(raw: &str) -> Vec<&str> {
    raw.split(FIELD_SEPARATOR).collect()
}

/// Text form of an arbitrary JSON column.
fn coerce_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
