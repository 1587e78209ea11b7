//! How placeholder names map onto record fields.
//!
//! Without a schema a template's *n*-th placeholder takes the record's
//! *n*-th field, whatever its name. That is what existing decks are authored
//! against, but reordering a template silently rebinds its fields. A
//! `schema.toml` pins names to field indices once per deck:
//!
//! ```toml
//! [fields]
//! Front = 0
//! Back = 1
//! Example = 2
//! ```

use crate::error::ConfigError;
use log::{debug, warn};
use serde::Deserialize;
use std::{collections::HashMap, fs, io, path::Path};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldMap {
    /// Placeholder #i binds field #i.
    #[default]
    Positional,
    /// Placeholder binds the field its name is declared at.
    Named(HashMap<String, usize>),
}

#[derive(Deserialize)]
struct SchemaFile {
    #[serde(default)]
    fields: HashMap<String, usize>,
}

impl FieldMap {
    /// Field index for the placeholder `name` found at `position` in its
    /// template. `None` if a named schema does not declare `name`.
    pub fn index_of(&self, position: usize, name: &str) -> Option<usize> {
        match self {
            FieldMap::Positional => Some(position),
            FieldMap::Named(map) => map.get(name).copied(),
        }
    }

    pub fn parse(src: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: SchemaFile = toml::from_str(src).map_err(|source| ConfigError::Schema {
            path: path.to_owned(),
            source,
        })?;
        Ok(FieldMap::Named(file.fields))
    }

    /// Read `path`. An absent file means positional binding.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(src) => Self::parse(&src, path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no schema at {}, binding positionally", path.display());
                Ok(FieldMap::Positional)
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// [`FieldMap::read`], falling back to positional binding on error.
    pub fn load(path: &Path) -> Self {
        Self::read(path).unwrap_or_else(|e| {
            warn!("{e}; binding positionally");
            FieldMap::Positional
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn positional_ignores_names() {
        assert_eq!(FieldMap::Positional.index_of(2, "anything"), Some(2));
    }

    #[test]
    fn named_schema_parses() {
        let map = FieldMap::parse("[fields]\nFront = 0\nBack = 1\n", Path::new("s.toml")).unwrap();
        assert_eq!(map.index_of(7, "Back"), Some(1));
        assert_eq!(map.index_of(0, "Example"), None);
    }

    #[test]
    fn bad_schema_is_an_error() {
        let err = FieldMap::parse("[fields]\nFront = \"zero\"\n", Path::new("s.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Schema { .. }));
    }

    #[test]
    fn absent_file_is_positional() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("schema.toml");
        assert_eq!(FieldMap::read(&path).unwrap(), FieldMap::Positional);
    }

    #[test]
    fn unreadable_schema_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.toml");
        fs::write(&path, "fields = 3").unwrap();
        assert_eq!(FieldMap::load(&path), FieldMap::Positional);
    }
}
