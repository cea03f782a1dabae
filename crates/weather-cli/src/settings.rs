//! Runtime configuration: optional TOML file, then `WEATHER_*` environment
//! variables, then command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use weather_store_sqlite::StoreOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  /// SQLite file backing the catalog. `~/` is expanded.
  #[serde(default = "default_database_path")]
  pub database_path: PathBuf,

  /// Insert the built-in catalog when the table is empty.
  #[serde(default = "default_true")]
  pub seed_on_open: bool,

  /// Listings a `watch` subscription may buffer.
  #[serde(default = "default_live_buffer")]
  pub live_buffer: usize,
}

fn default_database_path() -> PathBuf { PathBuf::from("~/.local/share/weather/weather.db") }

fn default_true() -> bool { true }

fn default_live_buffer() -> usize { StoreOptions::default().live_buffer }

impl Config {
  /// Load from `path` (missing file is fine) layered under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("WEATHER"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise Config")
  }

  pub fn store_options(&self) -> StoreOptions {
    StoreOptions { live_buffer: self.live_buffer }
  }

  /// `database_path` with a leading `~` expanded to `$HOME`.
  pub fn resolved_database_path(&self) -> PathBuf { expand_tilde(&self.database_path) }
}

fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = Config::load(Path::new("/nonexistent/weather.toml")).unwrap();
    assert!(cfg.seed_on_open);
    assert_eq!(cfg.live_buffer, 16);
  }

  #[test]
  fn absolute_paths_are_untouched() {
    assert_eq!(
      expand_tilde(Path::new("/var/lib/weather.db")),
      PathBuf::from("/var/lib/weather.db"),
    );
  }
}
