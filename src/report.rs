use crate::stopwatch::State;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// A point-in-time snapshot of a stopwatch.
///
/// Durations serialize as fractional seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub state: State,
    #[serde(serialize_with = "seconds_list")]
    pub laps: Vec<Duration>,
    pub lap_count: usize,
    #[serde(serialize_with = "seconds")]
    pub total_elapsed: Duration,
    #[serde(serialize_with = "seconds")]
    pub average_lap: Duration,
}

impl Summary {
    pub fn fastest_lap(&self) -> Option<Duration> {
        self.laps.iter().min().copied()
    }

    pub fn slowest_lap(&self) -> Option<Duration> {
        self.laps.iter().max().copied()
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} laps, total {:?}, average {:?}",
            self.lap_count, self.total_elapsed, self.average_lap
        )?;

        if let (Some(fastest), Some(slowest)) = (self.fastest_lap(), self.slowest_lap()) {
            write!(f, ", fastest {fastest:?}, slowest {slowest:?}")?;
        }

        Ok(())
    }
}

fn seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

fn seconds_list<S: Serializer>(laps: &[Duration], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(laps.iter().map(Duration::as_secs_f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(laps: Vec<Duration>) -> Summary {
        let total: Duration = laps.iter().sum();
        let average = if laps.is_empty() {
            Duration::ZERO
        } else {
            total / laps.len() as u32
        };

        Summary {
            state: State::Stopped,
            lap_count: laps.len(),
            laps,
            total_elapsed: total,
            average_lap: average,
        }
    }

    #[test]
    fn serializes_durations_as_seconds() {
        let summary = summary(vec![Duration::from_millis(500), Duration::from_millis(1500)]);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "state": "stopped",
                "laps": [0.5, 1.5],
                "lap_count": 2,
                "total_elapsed": 2.0,
                "average_lap": 1.0,
            })
        );
    }

    #[test]
    fn display_includes_extremes_only_with_laps() {
        let empty = summary(Vec::new());
        assert_eq!(empty.to_string(), "0 laps, total 0ns, average 0ns");

        let timed = summary(vec![Duration::from_millis(3), Duration::from_millis(1)]);
        assert_eq!(
            timed.to_string(),
            "2 laps, total 4ms, average 2ms, fastest 1ms, slowest 3ms"
        );
    }
}
