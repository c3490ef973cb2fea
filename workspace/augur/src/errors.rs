use std::io::{Error, ErrorKind};

use super::constants;

/// A training job that stopped in a state other than the two known ones.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingFailure {
  state: String,
}

impl TrainingFailure {
  pub fn new<T>(state: T) -> Self
  where
    T: std::fmt::Display,
  {
    TrainingFailure {
      state: format!("{}", state),
    }
  }

  pub fn state(&self) -> &str {
    self.state.as_str()
  }
}

impl std::fmt::Display for TrainingFailure {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(formatter, "{}{}", constants::TRAINING_ERROR_PREFIX, self.state)
  }
}

impl std::error::Error for TrainingFailure {}

impl From<TrainingFailure> for Error {
  fn from(failure: TrainingFailure) -> Error {
    Error::new(ErrorKind::Other, format!("{}", failure))
  }
}
