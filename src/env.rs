//! `.env` configuration.
//!
//! Plain `KEY=value` lines: surrounding whitespace is trimmed, blank lines
//! and `#` comments are skipped, the value is everything after the first
//! `=`. No quoting or interpolation. Later keys override earlier ones.

use crate::{cursor::DEFAULT_MAX_POSITION, error::ConfigError};
use log::warn;
use std::{collections::HashMap, fs, path::Path, path::PathBuf, time::Duration};

pub const KEY_PYTHON: &str = "PATH_TO_PYTHON_ENV";
pub const KEY_SCRIPT: &str = "PATH_TO_SCRIPT";
pub const KEY_RESULT: &str = "PATH_TO_QUERY_RES";
pub const KEY_TITLE: &str = "DECK_TITLE";
pub const KEY_MAX_POSITION: &str = "MAX_PROGRESSION";
pub const KEY_TIMEOUT: &str = "GENERATOR_TIMEOUT_SECS";

const DEFAULT_PYTHON: &str = "/usr/bin/python3";
const DEFAULT_TITLE: &str = "Flashcards";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Parse `.env` text into a key/value map.
pub fn parse(src: &str) -> HashMap<String, String> {
    src.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_once('='))
        .filter(|(k, _)| !k.trim().is_empty())
        .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
        .collect()
}

/// Read and parse the `.env` file at `path`.
pub fn read(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    fs::read_to_string(path)
        .map(|src| parse(&src))
        .map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })
}

/// Everything the display layer needs from `.env`, with defaults applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Interpreter used to launch the generator.
    pub python: PathBuf,
    pub script: Option<PathBuf>,
    /// JSON file the generator writes.
    pub result_path: Option<PathBuf>,
    pub title: String,
    /// Cursor max before the first deck is loaded.
    pub max_position: usize,
    pub generator_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_vars(&HashMap::new())
    }
}

impl Settings {
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let get = |k: &str| vars.get(k).map(String::as_str).filter(|v| !v.is_empty());

        Self {
            python: PathBuf::from(get(KEY_PYTHON).unwrap_or(DEFAULT_PYTHON)),
            script: get(KEY_SCRIPT).map(PathBuf::from),
            result_path: get(KEY_RESULT).map(PathBuf::from),
            title: get(KEY_TITLE).unwrap_or(DEFAULT_TITLE).to_owned(),
            max_position: parse_number(get(KEY_MAX_POSITION), KEY_MAX_POSITION)
                .unwrap_or(DEFAULT_MAX_POSITION),
            generator_timeout: Duration::from_secs(
                parse_number(get(KEY_TIMEOUT), KEY_TIMEOUT).unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }

    /// Load settings from `path`; a missing or unreadable file yields defaults.
    pub fn load(path: &Path) -> Self {
        match read(path) {
            Ok(vars) => Self::from_vars(&vars),
            Err(e) => {
                warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

fn parse_number<T: std::str::FromStr>(raw: Option<&str>, key: &str) -> Option<T> {
    let raw = raw?;
    match raw.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("ignoring non-numeric {key}={raw}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_comments_and_blanks() {
        let vars = parse(
            "# desklet config\n\n  PATH_TO_SCRIPT = /opt/deck/export.py  \nPATH_TO_QUERY_RES=/tmp/out.json\n",
        );
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[KEY_SCRIPT], "/opt/deck/export.py");
        assert_eq!(vars[KEY_RESULT], "/tmp/out.json");
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        let vars = parse("QUERY=a=b=c");
        assert_eq!(vars["QUERY"], "a=b=c");
    }

    #[test]
    fn lines_without_key_or_equals_are_ignored() {
        let vars = parse("=value\nJUSTAKEY\nEMPTY=\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars["EMPTY"], "");
    }

    #[test]
    fn later_keys_win() {
        assert_eq!(parse("A=1\nA=2")["A"], "2");
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.python, PathBuf::from("/usr/bin/python3"));
        assert_eq!(s.script, None);
        assert_eq!(s.result_path, None);
        assert_eq!(s.title, "Flashcards");
        assert_eq!(s.max_position, 10);
        assert_eq!(s.generator_timeout, Duration::from_secs(30));
    }

    #[test]
    fn empty_python_falls_back_to_default() {
        let s = Settings::from_vars(&parse("PATH_TO_PYTHON_ENV=\nMAX_PROGRESSION=many\n"));
        assert_eq!(s.python, PathBuf::from("/usr/bin/python3"));
        assert_eq!(s.max_position, 10);
    }

    #[test]
    fn settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "PATH_TO_PYTHON_ENV=/venv/bin/python\nDECK_TITLE=Korean\nMAX_PROGRESSION=25\nGENERATOR_TIMEOUT_SECS=5\n",
        )
        .unwrap();
        let s = Settings::load(&path);
        assert_eq!(s.python, PathBuf::from("/venv/bin/python"));
        assert_eq!(s.title, "Korean");
        assert_eq!(s.max_position, 25);
        assert_eq!(s.generator_timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read(&dir.path().join(".env")), Err(ConfigError::Read { .. })));
        assert_eq!(Settings::load(&dir.path().join(".env")), Settings::default());
    }
}
