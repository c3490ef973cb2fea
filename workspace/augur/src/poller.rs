use std::future::Future;
use std::io::Result;
use std::time::Duration;

use super::constants;
use super::errors::TrainingFailure;
use super::state::{standard, Reported, TrainingState, Verdict};

/// The result of waiting on a training job: the final status, or the state that stopped it.
#[derive(Debug)]
pub enum Outcome<S> {
  Complete(S),
  Failed(TrainingFailure),
}

impl<S> Outcome<S> {
  pub fn into_result(self) -> Result<S> {
    match self {
      Outcome::Complete(status) => Ok(status),
      Outcome::Failed(failure) => Err(failure.into()),
    }
  }
}

pub type Predicate = fn(&TrainingState) -> Verdict;

pub struct Poller<P> {
  interval: Duration,
  predicate: P,
}

impl Poller<Predicate> {
  pub fn new(interval: Duration) -> Self {
    Poller {
      interval,
      predicate: standard,
    }
  }
}

impl Default for Poller<Predicate> {
  fn default() -> Self {
    Poller::new(constants::DEFAULT_POLL_INTERVAL)
  }
}

impl<P> Poller<P>
where
  P: Fn(&TrainingState) -> Verdict,
{
  pub fn with_predicate(interval: Duration, predicate: P) -> Self {
    Poller { interval, predicate }
  }

  pub fn interval(&self) -> Duration {
    self.interval
  }

  /// Queries `fetch` until the predicate completes or rejects the reported state, calling `sleep` with the
  /// interval between every pair of queries. There is no retry limit. Errors from `fetch` are returned as-is.
  pub async fn wait<S, F, Fut, Z, ZFut>(&self, mut fetch: F, mut sleep: Z) -> Result<Outcome<S>>
  where
    S: Reported,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<S>>,
    Z: FnMut(Duration) -> ZFut,
    ZFut: Future<Output = ()>,
  {
    let mut queries = 0u64;

    loop {
      let status = fetch().await?;
      let state = status.state();
      queries += 1;

      println!("Training state: {}", state);
      log::debug!("training state '{}' (query {})", state, queries);

      match (self.predicate)(&state) {
        Verdict::Complete => {
          log::info!("training complete after {} queries", queries);
          return Ok(Outcome::Complete(status));
        }
        Verdict::Wait => {
          log::trace!("sleeping {:?} before next status query", self.interval);
          sleep(self.interval).await;
        }
        Verdict::Fatal => {
          log::warn!("training stopped in state '{}'", state);
          return Ok(Outcome::Failed(TrainingFailure::new(state)));
        }
      }
    }
  }
}

#[cfg(test)]
mod test {
  use std::cell::{Cell, RefCell};
  use std::future::ready;
  use std::io::{Error, ErrorKind, Result};
  use std::time::Duration;

  use async_std::task::block_on;

  use super::{Outcome, Poller};
  use crate::state::{Reported, TrainingState, Verdict};

  #[derive(Debug, Clone, PartialEq)]
  struct Scripted(&'static str);

  impl Reported for Scripted {
    fn state(&self) -> TrainingState {
      TrainingState::from(self.0)
    }
  }

  struct Run {
    outcome: Result<Outcome<Scripted>>,
    queries: usize,
    sleeps: Vec<Duration>,
  }

  fn run_script<P>(poller: &Poller<P>, script: Vec<&'static str>) -> Run
  where
    P: Fn(&TrainingState) -> Verdict,
  {
    let queries = Cell::new(0usize);
    let sleeps = RefCell::new(Vec::new());
    let mut script = script.into_iter();

    let outcome = block_on(poller.wait(
      || {
        queries.set(queries.get() + 1);
        ready(
          script
            .next()
            .map(Scripted)
            .ok_or_else(|| Error::new(ErrorKind::Other, "script exhausted")),
        )
      },
      |duration| {
        sleeps.borrow_mut().push(duration);
        ready(())
      },
    ));

    Run {
      outcome,
      queries: queries.get(),
      sleeps: sleeps.into_inner(),
    }
  }

  #[test]
  fn test_running_running_done() {
    let poller = Poller::new(Duration::from_secs(10));
    let run = run_script(&poller, vec!["RUNNING", "RUNNING", "DONE"]);
    assert_eq!(run.queries, 3);
    assert_eq!(run.sleeps, vec![Duration::from_secs(10), Duration::from_secs(10)]);

    match run.outcome.unwrap() {
      Outcome::Complete(status) => assert_eq!(status, Scripted("DONE")),
      Outcome::Failed(failure) => panic!("unexpected failure - {}", failure),
    }
  }

  #[test]
  fn test_done_without_sleep() {
    let run = run_script(&Poller::default(), vec!["DONE", "RUNNING"]);
    assert_eq!(run.queries, 1);
    assert!(run.sleeps.is_empty());
    assert!(matches!(run.outcome, Ok(Outcome::Complete(_))));
  }

  #[test]
  fn test_error_is_fatal() {
    let run = run_script(&Poller::default(), vec!["ERROR", "DONE"]);
    assert_eq!(run.queries, 1);
    assert!(run.sleeps.is_empty());

    let error = run.outcome.unwrap().into_result().unwrap_err();
    assert!(format!("{}", error).contains("Training Error: ERROR"));
  }

  #[test]
  fn test_other_states_are_fatal() {
    for state in vec!["", "CANCELLED", "ERROR: data not found", "running"] {
      let run = run_script(&Poller::default(), vec![state, "DONE"]);
      assert_eq!(run.queries, 1, "no retry after '{}'", state);
      assert!(run.sleeps.is_empty());

      match run.outcome.unwrap() {
        Outcome::Failed(failure) => assert_eq!(failure.state(), state),
        Outcome::Complete(_) => panic!("'{}' should not complete", state),
      }
    }
  }

  #[test]
  fn test_failure_after_running() {
    let run = run_script(&Poller::new(Duration::from_millis(5)), vec!["RUNNING", "ERROR"]);
    assert_eq!(run.queries, 2);
    assert_eq!(run.sleeps, vec![Duration::from_millis(5)]);
    assert!(matches!(run.outcome, Ok(Outcome::Failed(_))));
  }

  #[test]
  fn test_fetch_error_propagates() {
    let run = run_script(&Poller::default(), vec!["RUNNING"]);
    assert_eq!(run.queries, 2);
    assert_eq!(run.sleeps.len(), 1);
    assert_eq!(run.outcome.unwrap_err().kind(), ErrorKind::Other);
  }

  #[test]
  fn test_custom_predicate() {
    let poller = Poller::with_predicate(Duration::from_secs(1), |state: &TrainingState| match state {
      TrainingState::Other(raw) if raw == "QUEUED" => Verdict::Wait,
      TrainingState::Running => Verdict::Wait,
      TrainingState::Done => Verdict::Complete,
      TrainingState::Other(_) => Verdict::Fatal,
    });
    let run = run_script(&poller, vec!["QUEUED", "RUNNING", "DONE"]);
    assert_eq!(run.queries, 3);
    assert_eq!(run.sleeps.len(), 2);
    assert_eq!(poller.interval(), Duration::from_secs(1));
    assert!(matches!(run.outcome, Ok(Outcome::Complete(_))));
  }
}
