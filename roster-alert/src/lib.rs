pub mod webhook;

pub use webhook::{AlertOutcome, AlertSink};
