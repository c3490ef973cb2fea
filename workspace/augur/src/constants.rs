use std::time::Duration;

pub const RUNNING_STATE: &'static str = "RUNNING";
pub const DONE_STATE: &'static str = "DONE";

pub const TRAINING_ERROR_PREFIX: &'static str = "Training Error: ";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
