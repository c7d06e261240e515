//! Lap-timing stopwatch over an injectable monotonic clock.

pub mod clock;
pub mod error;
pub mod report;
pub mod stopwatch;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{Operation, StopwatchError};
pub use report::Summary;
pub use stopwatch::{State, Stopwatch};
