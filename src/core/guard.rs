//! Guard patterns for controlling state transitions.
//!
//! A guard is a sensor pattern. It matches a sensor vector when every
//! position is either a wildcard or equal to the sensor value. Matching is
//! pure and deterministic.

use super::signal::{Pattern, PatternError, Signals, Trit};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sensor pattern that decides whether a transition fires.
///
/// # Example
///
/// ```rust
/// use automata::core::{Guard, Signals};
///
/// // Button pressed, gate state irrelevant
/// let guard: Guard = "1**".parse().unwrap();
///
/// assert!(guard.matches(&"100".parse::<Signals>().unwrap()));
/// assert!(guard.matches(&"111".parse::<Signals>().unwrap()));
/// assert!(!guard.matches(&"011".parse::<Signals>().unwrap()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guard {
    pattern: Pattern,
}

impl Guard {
    pub fn new(pattern: Pattern) -> Self {
        Guard { pattern }
    }

    /// Guard that matches every sensor vector of the given length.
    pub fn always(len: usize) -> Self {
        Guard {
            pattern: Pattern::any(len),
        }
    }

    /// Check whether the sensor vector satisfies this guard.
    ///
    /// Vectors of a different length never match.
    pub fn matches(&self, sensors: &Signals) -> bool {
        self.pattern.len() == sensors.len()
            && self
                .pattern
                .trits()
                .iter()
                .zip(sensors.as_slice())
                .all(|(trit, bit)| match trit {
                    Trit::Any => true,
                    Trit::High => *bit,
                    Trit::Low => !*bit,
                })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

impl FromStr for Guard {
    type Err = PatternError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.parse().map(Guard::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(text: &str) -> Signals {
        text.parse().unwrap()
    }

    #[test]
    fn guard_matches_exact_values() {
        let guard: Guard = "10".parse().unwrap();

        assert!(guard.matches(&signals("10")));
        assert!(!guard.matches(&signals("11")));
        assert!(!guard.matches(&signals("00")));
    }

    #[test]
    fn wildcard_matches_both_values() {
        let guard: Guard = "*1".parse().unwrap();

        assert!(guard.matches(&signals("01")));
        assert!(guard.matches(&signals("11")));
        assert!(!guard.matches(&signals("10")));
    }

    #[test]
    fn always_matches_everything() {
        let guard = Guard::always(3);

        for text in ["000", "101", "111"] {
            assert!(guard.matches(&signals(text)));
        }
    }

    #[test]
    fn length_mismatch_never_matches() {
        let guard = Guard::always(3);
        assert!(!guard.matches(&signals("00")));
    }

    #[test]
    fn empty_guard_matches_empty_vector() {
        let guard = Guard::always(0);
        assert!(guard.matches(&Signals::zeros(0)));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard: Guard = "1*0*".parse().unwrap();
        let sensors = signals("1101");

        assert_eq!(guard.matches(&sensors), guard.matches(&sensors));
    }
}
