//! Error taxonomy for the card core.
//!
//! None of these are fatal: each is converted to visible text at the
//! boundary nearest its origin (see [`crate::session::Session`]).

use std::{path::PathBuf, time::Duration};
use thiserror::Error;

/// Problems reading `.env` or `schema.toml`. Callers fall back to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse schema {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Problems producing or reading the deck result file.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("result file path is not configured")]
    NoResultPath,

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The generator reported `{"error": "..."}`; shown verbatim.
    #[error("{0}")]
    Upstream(String),

    #[error("unexpected JSON format")]
    UnexpectedFormat,

    #[error("deck is empty")]
    EmptyDeck,

    #[error("generator script is not configured")]
    NoScript,

    #[error("cannot launch generator {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("generator did not finish within {timeout:?}")]
    GeneratorTimeout { timeout: Duration },

    #[error("refresh cancelled")]
    Cancelled,

    #[error("cannot wait for generator: {0}")]
    Wait(#[source] std::io::Error),

    #[error("generator thread stopped unexpectedly")]
    Disconnected,
}

/// A single record that cannot be turned into a card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("card {position} does not exist (deck has {len} cards)")]
    OutOfRange { position: usize, len: usize },

    #[error("record is not an array")]
    NotARow,

    #[error("record has {found} columns, expected 5 (missing {column})")]
    MissingColumn { column: &'static str, found: usize },
}
