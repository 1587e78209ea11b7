//! `deskcard` — flashcards rendered from an external deck generator.
//!
//! The generator writes a JSON array of note rows; each row's fields are
//! bound into its question/answer templates to produce the front and back
//! of a card. [`session::Session`] holds the display state that drives it.

pub mod binder;
pub mod ctx;
pub mod cursor;
pub mod deck;
pub mod env;
pub mod error;
pub mod generator;
pub mod record;
pub mod schema;
pub mod session;
pub mod template;

pub use binder::{RenderedCard, bind_card};
pub use cursor::CursorState;
pub use deck::Deck;
pub use error::{BindingError, ConfigError, DataSourceError};
pub use record::{Record, split_fields};
pub use schema::FieldMap;
pub use session::Session;
