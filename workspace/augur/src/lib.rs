pub mod constants;
pub mod errors;
pub mod poller;
pub mod state;

pub use errors::TrainingFailure;
pub use poller::{Outcome, Poller};
pub use state::{Reported, TrainingState, Verdict};
