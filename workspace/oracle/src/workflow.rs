use std::io::{ErrorKind, Result};

use serde::Serialize;

use augur::Poller;
use scroll::{InsertRequest, PredictRequest};

use crate::auth::Session;
use crate::client::{ModelService, Predictions};
use crate::config::Config;
use crate::constants;
use crate::credentials;
use crate::http::json_error;

/// A header block sized to the length of `line`, preceded by an empty line.
pub fn header<T>(line: T) -> String
where
  T: std::fmt::Display,
{
  let line = format!("{}", line);
  let rule = "=".repeat(line.chars().count());
  format!("\n{}\n{}\n{}", rule, line, rule)
}

pub fn pretty<T>(value: &T) -> Result<String>
where
  T: Serialize,
{
  serde_json::to_string_pretty(value).map_err(json_error)
}

/// Loads the credential and prepares a client. Nothing is sent until the first api call.
pub fn connect(config: &Config) -> Result<Predictions> {
  let key = credentials::load(&config.credential)?;
  let predictions = Predictions::new(Session::new(key), config.api_root.as_str(), config.project_id.as_str());
  log::info!("client ready - {}", predictions);
  Ok(predictions)
}

/// Runs every step in order; the first error stops the run and leaves any trained model in place.
pub async fn run<M>(predictions: &M, config: &Config) -> Result<()>
where
  M: ModelService,
{
  println!("{}", header("Fetching list of first ten models"));
  let list = predictions.list(constants::LIST_MAX_RESULTS).await?;
  println!("List results:");
  println!("{}", pretty(&list)?);

  println!("{}", header("Submitting model training request"));
  let request = InsertRequest::new(config.model_id.as_str(), config.object_name.as_str());
  let start = predictions.insert(&request).await?;
  println!("Training results:");
  println!("{}", pretty(&start)?);

  println!("{}", header("Waiting for training to complete"));
  let poller = Poller::new(config.poll_interval);
  let id = config.model_id.as_str();
  log::debug!("polling '{}' every {:?}", id, poller.interval());
  let status = poller
    .wait(|| predictions.get(id), async_std::task::sleep)
    .await?
    .into_result()?;
  log::debug!("final training status - {:?}", status);

  println!("{}", header("Fetching model description"));
  let analysis = predictions.analyze(id).await?;
  println!("Analyze results:");
  println!("{}", pretty(&analysis)?);

  println!("{}", header("Making some predictions"));
  for sample in constants::SAMPLE_TEXTS.iter() {
    let result = predictions.predict(id, &PredictRequest::text(sample)).await?;
    println!("Prediction results for \"{}\"...", sample);
    println!("{}", pretty(&result)?);
  }

  println!("{}", header("Deleting model"));
  predictions.delete(id).await?;
  println!("Model deleted.");

  log::info!("model '{}' trained, used and deleted in '{}'", id, predictions.project());
  Ok(())
}

/// Refused credentials end the run with the revocation notice and a normal exit; every other error is kept.
pub fn settle(result: Result<()>) -> Result<()> {
  match result {
    Err(error) if error.kind() == ErrorKind::PermissionDenied => {
      log::warn!("credentials refused - {}", error);
      println!("{}", constants::REVOKED_MESSAGE);
      Ok(())
    }
    other => other,
  }
}
