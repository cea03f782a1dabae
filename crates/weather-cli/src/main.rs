//! `weather` — command-line access to the weather condition store.
//!
//! Every command prints JSON on stdout, one value per line.
//!
//! # Usage
//!
//! ```text
//! weather seed
//! weather list
//! weather get 3
//! weather insert conditions.json
//! weather watch
//! ```

mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use weather_core::{WeatherCondition, WeatherStore, default_conditions};
use weather_store_sqlite::SqliteStore;

use crate::settings::Config;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "weather", version, about = "Weather condition store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "weather.toml")]
  config: PathBuf,

  /// Override the database path from the config.
  #[arg(long, env = "WEATHER_DATABASE")]
  database: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Insert the built-in catalog if the store is empty.
  Seed,
  /// Print every condition, ordered by id.
  List,
  /// Print one condition by id, or `null`.
  Get { id: i64 },
  /// Print a randomly chosen condition, or `null`.
  Random,
  /// Print the number of stored conditions.
  Count,
  /// Upsert conditions from a JSON array file.
  Insert { file: PathBuf },
  /// Remove every condition.
  Clear,
  /// Print the full listing now and after every change, until Ctrl-C.
  Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so stdout stays machine-readable.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut cfg = Config::load(&cli.config)?;
  if let Some(path) = cli.database {
    cfg.database_path = path;
  }

  let path = cfg.resolved_database_path();
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open_with(&path, cfg.store_options())
    .await
    .with_context(|| format!("failed to open store at {path:?}"))?;
  tracing::info!(path = %path.display(), "store opened");

  if cfg.seed_on_open && !matches!(cli.command, Command::Seed | Command::Clear) {
    store.ensure_populated(default_conditions()).await?;
  }

  run(&store, cli.command).await
}

async fn run(store: &SqliteStore, command: Command) -> anyhow::Result<()> {
  match command {
    Command::Seed => {
      let seeded = store.ensure_populated(default_conditions()).await?;
      tracing::info!(seeded, "seed finished");
      emit(&serde_json::json!({ "seeded": seeded }))?;
    }
    Command::List => {
      for row in store.list_weather().await? {
        emit(&row)?;
      }
    }
    Command::Get { id } => emit(&store.get_weather_by_id(id).await?)?,
    Command::Random => emit(&store.get_random_weather().await?)?,
    Command::Count => emit(&store.count().await?)?,
    Command::Insert { file } => {
      let text = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {file:?}"))?;
      let rows: Vec<WeatherCondition> = serde_json::from_str(&text)
        .with_context(|| format!("{file:?} is not a JSON array of conditions"))?;
      let n = rows.len();
      store.insert_all(rows).await?;
      tracing::info!(rows = n, "conditions inserted");
    }
    Command::Clear => {
      store.delete_all().await?;
      tracing::info!("store cleared");
    }
    Command::Watch => {
      let mut live = store.get_all_weather();
      loop {
        tokio::select! {
          _ = tokio::signal::ctrl_c() => break,
          next = live.next() => match next {
            Some(listing) => emit(&listing?)?,
            None => break,
          },
        }
      }
      live.cancel();
    }
  }
  Ok(())
}

fn emit<T: Serialize>(value: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string(value)?);
  Ok(())
}
