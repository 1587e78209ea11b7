//! The result file: a deck of rows, or an upstream error.

use crate::{
    binder::{RenderedCard, bind_card},
    error::{BindingError, DataSourceError},
    record::Record,
    schema::FieldMap,
};
use log::info;
use serde_json::Value;
use std::{fs, path::Path};

/// Rows from one read of the result file. Immutable; a reload builds a new
/// `Deck` which replaces the old one wholesale.
///
/// Rows are decoded lazily so that one malformed row only affects its own
/// card.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    rows: Vec<Value>,
}

impl Deck {
    /// Decode the generator's JSON output.
    pub fn from_json(src: &str) -> Result<Self, DataSourceError> {
        match serde_json::from_str::<Value>(src)? {
            Value::Array(rows) if rows.is_empty() => Err(DataSourceError::EmptyDeck),
            Value::Array(rows) => Ok(Self { rows }),
            Value::Object(obj) => match obj.get("error") {
                Some(Value::String(msg)) if !msg.is_empty() => {
                    Err(DataSourceError::Upstream(msg.clone()))
                }
                Some(v) if is_truthy(v) => Err(DataSourceError::Upstream(v.to_string())),
                _ => Err(DataSourceError::UnexpectedFormat),
            },
            _ => Err(DataSourceError::UnexpectedFormat),
        }
    }

    pub fn load(path: &Path) -> Result<Self, DataSourceError> {
        let src = fs::read_to_string(path).map_err(|source| DataSourceError::Read {
            path: path.to_owned(),
            source,
        })?;
        let deck = Self::from_json(&src)?;
        info!("loaded {} cards from {}", deck.len(), path.display());
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Decode the record at 0-based `index`.
    pub fn record(&self, index: usize) -> Result<Record, BindingError> {
        let row = self.rows.get(index).ok_or(BindingError::OutOfRange {
            position: index + 1,
            len: self.len(),
        })?;
        Record::from_value(row)
    }

    /// Render the card at 0-based `index`.
    pub fn card(&self, index: usize, map: &FieldMap) -> Result<RenderedCard, BindingError> {
        self.record(index).map(|r| bind_card(&r, map))
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
