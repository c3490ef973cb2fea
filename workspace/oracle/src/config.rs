use std::io::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use crate::constants;
use crate::credentials;

/// Trains a prediction model on csv data in cloud storage, waits for it, analyzes it, makes two predictions
/// and deletes it again.
#[derive(Debug, Parser)]
#[command(name = "oracle", version)]
pub struct Arguments {
  /// Full storage path of csv data (ex bucket/object)
  pub object_name: String,

  /// Model id of your choosing to name the trained model
  pub model_id: String,

  /// Project the model is billed to and owned by
  pub project_id: String,

  /// Service account credential json file, relative to the program's directory
  pub credential: PathBuf,

  /// Log filter, e.g. "debug" or "oracle=trace"
  #[arg(long, env = "ORACLE_LOG_LEVEL")]
  pub log_level: Option<String>,

  /// Seconds to wait between training status checks
  #[arg(long, env = "ORACLE_POLL_INTERVAL", default_value_t = augur::constants::DEFAULT_POLL_INTERVAL.as_secs())]
  pub poll_interval: u64,

  /// Root url of the prediction api
  #[arg(long, env = "ORACLE_API_ROOT", default_value = constants::PREDICTION_API_ROOT)]
  pub api_root: String,
}

#[derive(Debug, Clone)]
pub struct Config {
  pub object_name: String,
  pub model_id: String,
  pub project_id: String,
  pub credential: PathBuf,
  pub poll_interval: Duration,
  pub api_root: String,
}

impl Config {
  pub fn from_arguments(arguments: Arguments) -> Result<Self> {
    let base = credentials::program_dir()?;
    Ok(Config::resolve(arguments, &base))
  }

  pub fn resolve(arguments: Arguments, base: &Path) -> Self {
    let Arguments {
      object_name,
      model_id,
      project_id,
      credential,
      poll_interval,
      api_root,
      ..
    } = arguments;

    Config {
      credential: credentials::resolve(base, credential),
      poll_interval: Duration::from_secs(poll_interval),
      object_name,
      model_id,
      project_id,
      api_root,
    }
  }
}
