use super::constants;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingState {
  Running,
  Done,
  Other(String),
}

impl From<&str> for TrainingState {
  fn from(input: &str) -> Self {
    match input {
      constants::RUNNING_STATE => TrainingState::Running,
      constants::DONE_STATE => TrainingState::Done,
      other => TrainingState::Other(other.to_string()),
    }
  }
}

impl std::fmt::Display for TrainingState {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      TrainingState::Running => write!(formatter, "{}", constants::RUNNING_STATE),
      TrainingState::Done => write!(formatter, "{}", constants::DONE_STATE),
      TrainingState::Other(raw) => write!(formatter, "{}", raw),
    }
  }
}

/// What the poller should do after observing a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
  Wait,
  Complete,
  Fatal,
}

pub fn standard(state: &TrainingState) -> Verdict {
  match state {
    TrainingState::Running => Verdict::Wait,
    TrainingState::Done => Verdict::Complete,
    TrainingState::Other(_) => Verdict::Fatal,
  }
}

/// Anything a status query can return that carries a training state.
pub trait Reported {
  fn state(&self) -> TrainingState;
}

impl Reported for scroll::TrainedModel {
  fn state(&self) -> TrainingState {
    TrainingState::from(scroll::TrainedModel::state(self))
  }
}
