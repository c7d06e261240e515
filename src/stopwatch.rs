use crate::clock::{Clock, MonotonicClock};
use crate::error::{Operation, Result, StopwatchError};
use crate::report::Summary;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    #[default]
    Idle,
    Running,
    Stopped,
    Suspended,
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            State::Idle => "idle",
            State::Running => "running",
            State::Stopped => "stopped",
            State::Suspended => "suspended",
        };

        f.write_str(name)
    }
}

/// Measures run time and laps against a [`Clock`].
///
/// Mutating operations check the current [`State`] first and leave the
/// stopwatch untouched when they are rejected. Queries never change state.
#[derive(Debug, Clone)]
pub struct Stopwatch<C = MonotonicClock> {
    clock: C,
    state: State,
    // Clock reading at the start of the current run segment.
    start: Option<Duration>,
    // Clock reading at the start of the current lap segment.
    lap_start: Duration,
    // Lap progress made before the last suspend.
    lap_carry: Duration,
    total: Duration,
    laps: Vec<Duration>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::default())
    }
}

impl<C: Clock + Default> Default for Stopwatch<C> {
    fn default() -> Self {
        Self::with_clock(C::default())
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: State::Idle,
            start: None,
            lap_start: Duration::ZERO,
            lap_carry: Duration::ZERO,
            total: Duration::ZERO,
            laps: Vec::new(),
        }
    }

    /// Starts a fresh run, or resumes one after [`Stopwatch::stop`] keeping
    /// the accumulated total and laps.
    pub fn start(&mut self) -> Result<&mut Self> {
        self.require(Operation::Start, &[State::Idle, State::Stopped])?;

        let now = self.clock.now();
        self.start = Some(now);
        self.lap_start = now;
        self.lap_carry = Duration::ZERO;
        self.transition(State::Running);

        Ok(self)
    }

    /// Ends the current lap and returns its duration.
    pub fn lap(&mut self) -> Result<Duration> {
        self.require(Operation::Lap, &[State::Running])?;

        let now = self.clock.now();
        let lap = self.lap_carry + now.saturating_sub(self.lap_start);
        self.laps.push(lap);
        self.lap_start = now;
        self.lap_carry = Duration::ZERO;

        tracing::trace!(?lap, count = self.laps.len(), "Recorded lap");

        Ok(lap)
    }

    /// Discards the progress of the current lap without recording it.
    pub fn reset_lap(&mut self) -> Result<()> {
        self.require(Operation::ResetLap, &[State::Running])?;

        self.lap_start = self.clock.now();
        self.lap_carry = Duration::ZERO;

        Ok(())
    }

    /// Stops the run and returns the total elapsed time.
    pub fn stop(&mut self) -> Result<Duration> {
        self.require(Operation::Stop, &[State::Running])?;

        let now = self.clock.now();
        if let Some(start) = self.start.take() {
            self.total += now.saturating_sub(start);
        }
        self.transition(State::Stopped);

        Ok(self.total)
    }

    /// Pauses accumulation without ending the run or the current lap.
    pub fn suspend(&mut self) -> Result<()> {
        self.require(Operation::Suspend, &[State::Running])?;

        let now = self.clock.now();
        if let Some(start) = self.start.take() {
            self.total += now.saturating_sub(start);
        }
        self.lap_carry += now.saturating_sub(self.lap_start);
        self.transition(State::Suspended);

        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        self.require(Operation::Resume, &[State::Suspended])?;

        let now = self.clock.now();
        self.start = Some(now);
        self.lap_start = now;
        self.transition(State::Running);

        Ok(())
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.lap_start = Duration::ZERO;
        self.lap_carry = Duration::ZERO;
        self.total = Duration::ZERO;
        self.laps.clear();
        self.transition(State::Idle);
    }

    pub fn total_elapsed(&self) -> Duration {
        match self.start {
            Some(start) => self.total + self.clock.now().saturating_sub(start),
            None => self.total,
        }
    }

    /// Time spent in the current, unfinished lap.
    pub fn lap_elapsed(&self) -> Duration {
        match self.state {
            State::Running => self.lap_carry + self.clock.now().saturating_sub(self.lap_start),
            State::Suspended => self.lap_carry,
            State::Idle | State::Stopped => Duration::ZERO,
        }
    }

    /// Mean of the recorded laps, or zero when there are none.
    pub fn average_lap(&self) -> Duration {
        if self.laps.is_empty() {
            return Duration::ZERO;
        }

        let sum: u128 = self.laps.iter().map(Duration::as_nanos).sum();
        let mean = sum / self.laps.len() as u128;

        Duration::new(
            (mean / 1_000_000_000) as u64,
            (mean % 1_000_000_000) as u32,
        )
    }

    pub fn lap_count(&self) -> usize {
        self.laps.len()
    }

    /// Completed laps in the order they were recorded.
    pub fn laps(&self) -> &[Duration] {
        &self.laps
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn summary(&self) -> Summary {
        Summary {
            state: self.state,
            laps: self.laps.clone(),
            lap_count: self.laps.len(),
            total_elapsed: self.total_elapsed(),
            average_lap: self.average_lap(),
        }
    }

    fn require(&self, operation: Operation, allowed: &[State]) -> Result<()> {
        if allowed.contains(&self.state) {
            return Ok(());
        }

        tracing::debug!(%operation, state = %self.state, "Rejected stopwatch transition");

        Err(StopwatchError::InvalidStateTransition {
            operation,
            state: self.state,
        })
    }

    fn transition(&mut self, next: State) {
        tracing::trace!(from = %self.state, to = %next, total = ?self.total, "Stopwatch transition");
        self.state = next;
    }
}
