use crate::stopwatch::State;
use std::fmt::{Display, Formatter};

/// The stopwatch operations that can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Start,
    Stop,
    Lap,
    ResetLap,
    Suspend,
    Resume,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::Lap => "lap",
            Operation::ResetLap => "reset_lap",
            Operation::Suspend => "suspend",
            Operation::Resume => "resume",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StopwatchError {
    /// The operation is not allowed from the stopwatch's current state.
    /// Nothing was changed.
    #[error("cannot {operation} a stopwatch that is {state}")]
    InvalidStateTransition { operation: Operation, state: State },
}

pub type Result<T> = std::result::Result<T, StopwatchError>;
