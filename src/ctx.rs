use anyhow::{Context, Result};
use std::path::PathBuf;

/// Filesystem paths the widget reads its configuration from.
/// Constructed once at startup; never mutated after that.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub config_dir: PathBuf,
    pub env_file: PathBuf,
    pub schema_file: PathBuf,
}

impl Ctx {
    /// Paths under `$XDG_CONFIG_HOME/deskcard`, or `dir` when given.
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = match dir {
            Some(d) => d,
            None => {
                let home = std::env::var("HOME").context("$HOME is not set")?;
                let xdg = std::env::var("XDG_CONFIG_HOME")
                    .ok()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| format!("{home}/.config"));
                PathBuf::from(xdg).join("deskcard")
            }
        };

        Ok(Self::in_dir(config_dir))
    }

    pub fn in_dir(config_dir: PathBuf) -> Self {
        Self {
            env_file: config_dir.join(".env"),
            schema_file: config_dir.join("schema.toml"),
            config_dir,
        }
    }
}
