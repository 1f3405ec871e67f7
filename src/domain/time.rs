use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::time::Duration;

/// Which timeline a delay is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeKind {
    /// Simulation time - stops while the session is paused
    Sim,
    /// Real (wall) time - keeps running while paused
    Real,
}

impl fmt::Display for TimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeKind::Sim => write!(f, "sim"),
            TimeKind::Real => write!(f, "real"),
        }
    }
}

/// A point on one of the session's timelines, in milliseconds
///
/// Integer milliseconds keep comparisons exact and serialization trivial.
/// Values from the sim and real timelines are not interchangeable; the
/// scheduler keeps them in separate lanes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SimTime(u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub fn from_millis(millis: u64) -> Self {
        SimTime(millis)
    }

    pub fn from_secs(secs: u64) -> Self {
        SimTime(secs * 1000)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Move this point forward by `dt`, saturating at the end of the
    /// timeline
    pub fn advance(&mut self, dt: Duration) {
        self.0 = self.0.saturating_add(saturating_millis(dt));
    }

    /// Time elapsed since `earlier`, clamped to zero if `earlier` is in
    /// the future
    pub fn saturating_since(&self, earlier: SimTime) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: Duration) -> SimTime {
        SimTime(self.0.saturating_add(saturating_millis(rhs)))
    }
}

fn saturating_millis(dt: Duration) -> u64 {
    u64::try_from(dt.as_millis()).unwrap_or(u64::MAX)
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_ordering() {
        let mut t = SimTime::ZERO;
        t.advance(Duration::from_millis(250));
        assert_eq!(t.as_millis(), 250);
        assert!(t > SimTime::ZERO);
        assert!(t < SimTime::from_secs(1));
    }

    #[test]
    fn test_add_duration() {
        let t = SimTime::from_secs(100) + Duration::from_secs(5);
        assert_eq!(t, SimTime::from_secs(105));
    }

    #[test]
    fn test_saturating_since_clamps_to_zero() {
        let earlier = SimTime::from_secs(100);
        let later = SimTime::from_secs(102);

        assert_eq!(later.saturating_since(earlier), Duration::from_secs(2));
        // A point "before" the reference yields zero, not an underflow
        assert_eq!(earlier.saturating_since(later), Duration::ZERO);
    }

    #[test]
    fn test_advance_saturates_instead_of_wrapping() {
        let mut t = SimTime::from_millis(u64::MAX - 10);
        t.advance(Duration::from_secs(1));
        assert_eq!(t.as_millis(), u64::MAX);
    }

    #[test]
    fn test_add_clamps_oversized_durations() {
        // Duration::MAX in millis does not fit in u64
        let t = SimTime::ZERO + Duration::MAX;
        assert_eq!(t.as_millis(), u64::MAX);

        let t = SimTime::from_millis(u64::MAX) + Duration::from_secs(1);
        assert_eq!(t.as_millis(), u64::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(SimTime::from_millis(1500).to_string(), "1500ms");
        assert_eq!(TimeKind::Sim.to_string(), "sim");
        assert_eq!(TimeKind::Real.to_string(), "real");
    }

    #[test]
    fn test_serialization() {
        let t = SimTime::from_millis(12345);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "12345");

        let back: SimTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
